//! Shop catalog helpers over normalized product records.

use std::collections::BTreeMap;
use std::fmt;

use croft_core::normalize_id;
use serde::Serialize;

use crate::record::NormalizedRecord;

/// Emoji shown for categories that do not set one.
pub const DEFAULT_CATEGORY_EMOJI: &str = "📦";

/// Stock at or below this count is shown as "only N left".
pub const LOW_STOCK_THRESHOLD: i64 = 3;

/// Category filter value that matches every product.
pub const ALL_CATEGORIES: &str = "all";

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: String,
    pub emoji: String,
    pub slug: String,
}

impl Category {
    /// Read the `category` mapping of a product; `None` without a name.
    pub fn from_record(record: &NormalizedRecord) -> Option<Self> {
        let name = record.text("category.name")?;
        let emoji = record
            .text("category.emoji")
            .unwrap_or_else(|| DEFAULT_CATEGORY_EMOJI.to_string());
        let slug = record
            .text("category.slug")
            .unwrap_or_else(|| normalize_id(&name));
        Some(Self { name, emoji, slug })
    }
}

/// Unique categories across products, sorted by name.
pub fn categories(records: &[NormalizedRecord]) -> Vec<Category> {
    let mut by_slug: BTreeMap<String, Category> = BTreeMap::new();
    for category in records.iter().filter_map(Category::from_record) {
        by_slug.entry(category.slug.clone()).or_insert(category);
    }
    let mut out: Vec<Category> = by_slug.into_values().collect();
    out.sort_by(|a, b| a.name.cmp(&b.name));
    out
}

/// Whether a product is listed in the shop.
pub fn is_available(record: &NormalizedRecord) -> bool {
    record.get_bool("available").unwrap_or(false)
}

/// Whether a product belongs to the category with `slug`.
pub fn in_category(record: &NormalizedRecord, slug: &str) -> bool {
    slug == ALL_CATEGORIES
        || Category::from_record(record).is_some_and(|c| c.slug == slug)
}

/// Stock display state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    InStock(i64),
    LowStock(i64),
    OutOfStock,
}

impl StockStatus {
    /// Classify a stock count.
    pub fn from_count(stock: i64) -> Self {
        match stock {
            n if n <= 0 => Self::OutOfStock,
            n if n <= LOW_STOCK_THRESHOLD => Self::LowStock(n),
            n => Self::InStock(n),
        }
    }

    /// Stock status of a product record.
    pub fn of(record: &NormalizedRecord) -> Self {
        Self::from_count(record.get_i64("stock").unwrap_or(0))
    }

    /// Whether the product can be added to the cart.
    pub fn can_purchase(self) -> bool {
        !matches!(self, Self::OutOfStock)
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InStock(n) => write!(f, "In Stock ({n})"),
            Self::LowStock(n) => write!(f, "Only {n} left"),
            Self::OutOfStock => f.write_str("Sold Out"),
        }
    }
}

/// A price split for display as whole dollars and superscript cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price {
    pub dollars: i64,
    pub cents: u8,
}

impl Price {
    /// Split an amount, rounding to the nearest cent.
    pub fn from_amount(amount: f64) -> Self {
        let total_cents = (amount.max(0.0) * 100.0).round() as i64;
        Self {
            dollars: total_cents / 100,
            cents: (total_cents % 100) as u8,
        }
    }

    /// Zero-padded cents (`"05"`).
    pub fn cents_str(&self) -> String {
        format!("{:02}", self.cents)
    }
}

/// Format an amount as `$1234.50`.
pub fn format_currency(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Cart identifier of a product: its SKU, or its kebab-cased title.
pub fn product_id(record: &NormalizedRecord) -> String {
    record
        .text("sku")
        .unwrap_or_else(|| normalize_id(record.get_str("title").unwrap_or(record.id())))
}

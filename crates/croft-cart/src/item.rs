//! Cart line items.

use croft_content::catalog::product_id;
use croft_content::record::NormalizedRecord;
use croft_content::schemas::PRODUCT_PLACEHOLDER_IMAGE;
use serde::{Deserialize, Serialize};

/// Per-customer limit for products that do not set one.
pub const DEFAULT_MAX_QUANTITY: u32 = 999;

fn default_max_quantity() -> u32 {
    DEFAULT_MAX_QUANTITY
}

/// One line of the cart, as stored in the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
    pub quantity: u32,
    #[serde(default = "default_max_quantity")]
    pub max_quantity: u32,
}

impl CartItem {
    /// Price times quantity.
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// A product about to be added to the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub image: String,
    pub max_quantity: u32,
}

impl NewItem {
    /// An item with no image and the default limit.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: String::new(),
            max_quantity: DEFAULT_MAX_QUANTITY,
        }
    }

    /// Set the image.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Set the per-customer limit; `0` means the default.
    pub fn with_max_quantity(mut self, max: u32) -> Self {
        self.max_quantity = if max == 0 { DEFAULT_MAX_QUANTITY } else { max };
        self
    }

    /// Build from a normalized product record.
    ///
    /// The limit is `max_quantity` when set, otherwise the stock count,
    /// otherwise [`DEFAULT_MAX_QUANTITY`].
    pub fn from_product(record: &NormalizedRecord) -> Self {
        let positive = |key: &str| {
            record
                .get_i64(key)
                .filter(|n| *n > 0)
                .and_then(|n| u32::try_from(n).ok())
        };
        let max = positive("max_quantity")
            .or_else(|| positive("stock"))
            .unwrap_or(DEFAULT_MAX_QUANTITY);

        Self {
            id: product_id(record),
            name: record.get_str("title").unwrap_or(record.id()).to_string(),
            price: record.get_f64("price").unwrap_or(0.0),
            image: record
                .get_str("image")
                .unwrap_or(PRODUCT_PLACEHOLDER_IMAGE)
                .to_string(),
            max_quantity: max,
        }
    }

    /// The first cart line for this item. A zero limit falls back to
    /// [`DEFAULT_MAX_QUANTITY`] so the line always holds at least one.
    pub(crate) fn into_cart_item(self) -> CartItem {
        let max_quantity = match self.max_quantity {
            0 => DEFAULT_MAX_QUANTITY,
            max => max,
        };
        CartItem {
            id: self.id,
            name: self.name,
            price: self.price,
            image: self.image,
            quantity: 1,
            max_quantity,
        }
    }
}

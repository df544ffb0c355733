//! Handlers for the content and cart commands.
//!
//! Each handler returns what it would print so tests can check it; the
//! `run_*` wrappers do the printing.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use croft_cart::{AddOutcome, Cart, FileStore, NewItem};
use croft_content::catalog::{format_currency, in_category, is_available, StockStatus};
use croft_content::index::{default_index_path, write_index};
use croft_content::schemas::{product_schema, schema_by_name};
use croft_content::source::document_path;
use croft_content::{
    load_collection_and_render, load_document, normalize_document, order_key, CollectionLoader,
    ContentSource, FieldSchema, FsContentSource, HttpContentSource, LoadedDocument,
    NormalizedRecord, Rendered,
};

use crate::cli::CartAction;
use crate::config::CroftConfig;

/// Directory holding product documents.
pub const PRODUCTS_DIR: &str = "products";

// ============================================================================
// Shared helpers
// ============================================================================

/// The configured content source: the published site when `base_url` is
/// set, otherwise the content directory on disk.
pub fn content_source(config: &CroftConfig) -> Arc<dyn ContentSource> {
    match &config.content.base_url {
        Some(url) => Arc::new(HttpContentSource::new(url.clone())),
        None => Arc::new(FsContentSource::new(&config.content.path)),
    }
}

/// Look up a built-in schema by name.
pub fn resolve_schema(name: &str) -> Result<FieldSchema> {
    schema_by_name(name)
        .with_context(|| format!("Unknown schema '{name}' (expected product, animal or page)"))
}

fn is_product_schema(name: &str) -> bool {
    matches!(name, "product" | "products")
}

// ============================================================================
// index
// ============================================================================

/// Write the slug manifest for `dir` and report what was written.
pub fn cmd_index(dir: &Path, output: Option<&Path>) -> Result<String> {
    let output = output.map_or_else(|| default_index_path(dir), Path::to_path_buf);
    let slugs = write_index(dir, &output)
        .with_context(|| format!("Failed to index {}", dir.display()))?;
    Ok(format!("Wrote {} entries to {}", slugs.len(), output.display()))
}

// ============================================================================
// show
// ============================================================================

/// Load one document from disk.
pub fn cmd_show(file: &Path, schema: &str) -> Result<LoadedDocument> {
    let schema = resolve_schema(schema)?;
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let id = croft_core::slug_from_path(file).unwrap_or_else(|| file.display().to_string());
    Ok(load_document(&id, &raw, &schema))
}

/// Print a loaded document as JSON, with diagnostics on stderr if asked.
pub fn run_show(file: &Path, schema: &str, diagnostics: bool) -> Result<()> {
    let loaded = cmd_show(file, schema)?;
    println!("{}", serde_json::to_string_pretty(&loaded.record)?);
    if diagnostics {
        if !loaded.had_frontmatter {
            eprintln!("no frontmatter block");
        }
        for diagnostic in &loaded.diagnostics {
            eprintln!("{diagnostic}");
        }
    }
    Ok(())
}

// ============================================================================
// list
// ============================================================================

/// Options for [`cmd_list`].
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub schema: Option<String>,
    pub category: Option<String>,
    pub include_unavailable: bool,
}

/// One display line for a record.
pub fn describe(record: &NormalizedRecord, product: bool) -> String {
    let label = record
        .text("title")
        .or_else(|| record.text("name"))
        .unwrap_or_else(|| record.id().to_string());
    if product {
        let price = format_currency(record.get_f64("price").unwrap_or(0.0));
        format!("{}  {label}  {price}  {}", record.id(), StockStatus::of(record))
    } else {
        format!("{}  {label}", record.id())
    }
}

/// Load `collection` and render one line per record.
pub async fn cmd_list(
    config: &CroftConfig,
    collection: &str,
    options: &ListOptions,
) -> Result<Rendered<String>> {
    let schema_name = options.schema.as_deref().unwrap_or(collection);
    let schema = resolve_schema(schema_name)?;
    let product = is_product_schema(schema_name);

    let loader = CollectionLoader::new(content_source(config), collection, schema)
        .with_timeout(config.fetch_timeout());

    let category = options.category.as_deref();
    let include_unavailable = options.include_unavailable;
    let filter = |r: &NormalizedRecord| {
        (!product || include_unavailable || is_available(r))
            && category.is_none_or(|slug| in_category(r, slug))
    };

    Ok(load_collection_and_render(&loader, filter, order_key, |r| describe(r, product)).await)
}

/// Print a collection, or its empty-state message.
pub async fn run_list(config: &CroftConfig, collection: &str, options: &ListOptions) -> Result<()> {
    match cmd_list(config, collection, options).await? {
        Rendered::Items(lines) => lines.iter().for_each(|line| println!("{line}")),
        Rendered::Empty(state) => println!("{}", state.message()),
    }
    Ok(())
}

// ============================================================================
// cart
// ============================================================================

/// Open the configured cart.
pub fn open_cart(config: &CroftConfig) -> Result<Cart<FileStore>> {
    let cart = Cart::hydrate(FileStore::new(config.cart_dir()?), &config.cart.storage_key);
    if !cart.is_persistent() {
        log::warn!("Cart storage is unavailable; changes will not be saved");
    }
    Ok(cart)
}

/// Load a product by slug and add one to `cart`.
pub async fn cart_add(
    config: &CroftConfig,
    cart: &mut Cart<FileStore>,
    slug: &str,
) -> Result<String> {
    let source = content_source(config);
    let path = document_path(PRODUCTS_DIR, slug);
    let raw = tokio::time::timeout(config.fetch_timeout(), source.fetch(&path))
        .await
        .with_context(|| format!("Timed out loading {path}"))?
        .with_context(|| format!("Product '{slug}' could not be loaded"))?;
    let record = normalize_document(slug, &raw, &product_schema());

    if !is_available(&record) {
        bail!("{} is not available", describe_name(&record));
    }
    if !StockStatus::of(&record).can_purchase() {
        bail!("{} is sold out", describe_name(&record));
    }

    let item = NewItem::from_product(&record);
    let name = item.name.clone();
    let message = match cart.add(item)? {
        AddOutcome::Added => format!("{name} added to cart"),
        AddOutcome::Incremented(n) => format!("{name} quantity is now {n}"),
    };
    Ok(message)
}

fn describe_name(record: &NormalizedRecord) -> String {
    record
        .text("title")
        .unwrap_or_else(|| record.id().to_string())
}

/// Display lines for the cart contents and totals.
pub fn cart_lines(cart: &Cart<FileStore>) -> Vec<String> {
    if cart.is_empty() {
        return vec!["Your cart is empty".to_string()];
    }
    let mut lines: Vec<String> = cart
        .items()
        .iter()
        .map(|item| {
            format!(
                "{}  {} x{}  {}",
                item.id,
                item.name,
                item.quantity,
                format_currency(item.line_total())
            )
        })
        .collect();
    let totals = cart.totals();
    lines.push(format!(
        "{} item(s), subtotal {}",
        totals.item_count,
        format_currency(totals.subtotal)
    ));
    lines
}

/// Run a cart subcommand against the configured cart.
pub async fn run_cart(config: &CroftConfig, action: CartAction) -> Result<()> {
    let mut cart = open_cart(config)?;
    match action {
        CartAction::Add { slug } => println!("{}", cart_add(config, &mut cart, &slug).await?),
        CartAction::Remove { id } => {
            let removed = cart.remove(&id)?;
            println!("Removed {}", removed.name);
        }
        CartAction::Set { id, quantity } => {
            cart.set_quantity(&id, quantity)?;
            println!("{id} quantity set to {quantity}");
        }
        CartAction::Show => cart_lines(&cart).iter().for_each(|line| println!("{line}")),
        CartAction::Clear => {
            cart.clear();
            println!("Cart cleared");
        }
    }
    Ok(())
}

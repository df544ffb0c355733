//! The shop page: products from disk, filtered by category, rendered to cards.

use std::sync::Arc;

use croft_content::catalog::{categories, in_category, is_available, product_id, Price, StockStatus};
use croft_content::collection::{order_key, CollectionLoader};
use croft_content::index::{default_index_path, write_index};
use croft_content::page::{load_and_bind, load_collection_and_render, PageStatus, Rendered};
use croft_content::schemas::{page_schema, product_schema};
use croft_content::source::{ContentSource, FsContentSource};
use croft_content::{MemoryView, SlotMap};
use tempfile::TempDir;

use crate::common::{product_doc, PRODUCTS};

fn site() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let products = dir.path().join(PRODUCTS);
    std::fs::create_dir_all(&products).unwrap();
    std::fs::write(
        products.join("soap.md"),
        product_doc("Goat Milk Soap", "$8", "Bath and Body", true),
    )
    .unwrap();
    std::fs::write(
        products.join("scarf.md"),
        product_doc("Hand Knit Scarf", "$1,270", "Fiber Arts", true),
    )
    .unwrap();
    std::fs::write(
        products.join("retired.md"),
        product_doc("Old Candle", "$5", "Bath and Body", false),
    )
    .unwrap();

    let pages = dir.path().join("content/pages");
    std::fs::create_dir_all(&pages).unwrap();
    std::fs::write(
        pages.join("shop-settings.md"),
        "---\nhero_section:\n  title_line_1: Farm\n  title_line_2: Store\n---\n",
    )
    .unwrap();
    dir
}

#[tokio::test]
async fn test_shop_cards_for_category() {
    let dir = site();
    let loader = CollectionLoader::new(
        Arc::new(FsContentSource::new(dir.path())),
        PRODUCTS,
        product_schema(),
    );

    let rendered = load_collection_and_render(
        &loader,
        |r| is_available(r) && in_category(r, "bath-and-body"),
        order_key,
        |r| {
            let price = Price::from_amount(r.get_f64("price").unwrap_or(0.0));
            format!("{}:{}.{}:{}", product_id(r), price.dollars, price.cents_str(), StockStatus::of(r))
        },
    )
    .await;

    assert_eq!(
        rendered,
        Rendered::Items(vec!["goat-milk-soap:8.00:In Stock (5)".to_string()])
    );
}

#[tokio::test]
async fn test_category_list_from_available_products() {
    let dir = site();
    let loader = CollectionLoader::new(
        Arc::new(FsContentSource::new(dir.path())),
        PRODUCTS,
        product_schema(),
    );
    let outcome = loader.load(is_available, order_key).await;
    let slugs: Vec<_> = categories(outcome.records())
        .into_iter()
        .map(|c| c.slug)
        .collect();
    assert_eq!(slugs, vec!["bath-and-body", "fiber-arts"]);
}

#[tokio::test]
async fn test_settings_page_binds_hero() {
    let dir = site();
    let source = FsContentSource::new(dir.path());
    let slots = SlotMap::new()
        .text("shop-hero-title-1", "hero_section.title_line_1")
        .text("shop-hero-title-2", "hero_section.title_line_2")
        .text("shop-hero-subtitle", "hero_section.subtitle");
    let mut view = MemoryView::new().with_placeholder("shop-hero-subtitle", "Handmade goods");

    let status = load_and_bind(
        &source,
        "content/pages/shop-settings.md",
        &page_schema(),
        &slots,
        &mut view,
    )
    .await;

    let PageStatus::Bound(report) = status else {
        panic!("expected the page to bind");
    };
    assert_eq!(report.untouched, vec!["shop-hero-subtitle"]);
    assert_eq!(view.text("shop-hero-title-2"), Some("Store"));
    assert_eq!(view.text("shop-hero-subtitle"), Some("Handmade goods"));
}

#[tokio::test]
async fn test_index_matches_listing() {
    let dir = site();
    let products = dir.path().join(PRODUCTS);
    let output = default_index_path(&products);
    let written = write_index(&products, &output).unwrap();

    let listed = FsContentSource::new(dir.path()).list(PRODUCTS).await.unwrap();
    assert_eq!(written, listed);
    assert_eq!(written, vec!["retired", "scarf", "soap"]);
}

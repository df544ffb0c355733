//! Documents through split, parse and normalize.

use croft_content::markdown::FrontmatterValue;
use croft_content::record::{load_document, normalize_document};
use croft_content::schemas::{animal_schema, product_schema, ANIMAL_PLACEHOLDER_PHOTO};

#[test]
fn test_document_without_frontmatter_gets_every_default() {
    let raw = "\n  Just a short note about the barn.  \n";
    let schema = animal_schema();
    let record = normalize_document("note", raw, &schema);

    for spec in schema.specs() {
        assert_eq!(
            record.get(spec.name()),
            spec.default_value(),
            "field {}",
            spec.name()
        );
    }
    assert_eq!(record.fields().len(), schema.specs().len());
    assert_eq!(record.body(), raw.trim());
}

#[test]
fn test_legacy_featured_image_becomes_photo() {
    let record = normalize_document(
        "buttercup",
        "---\nname: Buttercup\nfeatured_image: \"x.jpg\"\n---\n",
        &animal_schema(),
    );
    assert_eq!(record.get_str("photo"), Some("x.jpg"));
    assert_ne!(record.get_str("photo"), Some(ANIMAL_PLACEHOLDER_PHOTO));
}

#[test]
fn test_full_product_document() {
    let raw = r#"---
# Product details
title: "Lavender Goat Milk Soap"
price: "$1,270.50"
weight: 4.5
stock: 2
order: 3
available: true
featured: false
category:
  name: Bath and Body
  emoji: 🧼
details_section:
  ingredients: |
    Goat milk, lavender oil,
    and shea butter.
  care: Keep dry
---

Made in **small batches**.
Cured for six weeks.
"#;
    let loaded = load_document("lavender-soap", raw, &product_schema());
    let record = &loaded.record;

    assert!(loaded.had_frontmatter);
    assert!(loaded.diagnostics.is_empty());
    assert_eq!(record.get_str("title"), Some("Lavender Goat Milk Soap"));
    assert_eq!(record.get_f64("price"), Some(1270.5));
    assert_eq!(record.get_f64("weight"), Some(4.5));
    assert_eq!(record.get_i64("stock"), Some(2));
    assert_eq!(record.get_i64("order"), Some(3));
    assert_eq!(record.get_bool("available"), Some(true));
    assert_eq!(record.get_str("category.emoji"), Some("🧼"));
    assert_eq!(
        record.get_str("details_section.ingredients"),
        Some("Goat milk, lavender oil,\nand shea butter.")
    );
    assert_eq!(record.get_str("details_section.care"), Some("Keep dry"));
    assert_eq!(
        record.body(),
        "Made in **small batches**.\nCured for six weeks."
    );
}

#[test]
fn test_gallery_deeper_than_supported_is_reported() {
    let raw = "---\nlitters:\n  - name: Spring\n    photos:\n      - image: a.jpg\n---\n";
    let loaded = load_document("gallery", raw, &croft_content::FieldSchema::new());
    assert_eq!(loaded.record.get_str("litters.0.name"), Some("Spring"));
    assert!(loaded.record.get_path("litters.0.photos").is_none());
    assert_eq!(loaded.diagnostics.len(), 2);
    assert!(matches!(
        loaded.record.get("litters"),
        Some(FrontmatterValue::Sequence(items)) if items.len() == 1
    ));
}

#[test]
fn test_parsing_twice_is_identical() {
    let raw = "---\nname: A\nhero:\n  title: B\ntags:\n  - x\n---\nBody";
    let a = normalize_document("a", raw, &animal_schema());
    let b = normalize_document("a", raw, &animal_schema());
    assert_eq!(a, b);
}

#[test]
fn test_bracketed_product_title_survives() {
    let record = normalize_document(
        "soap",
        "---\ntitle: [Draft] Soap [New]\nprice:8\n---\n",
        &product_schema(),
    );
    assert_eq!(record.get_str("title"), Some("[Draft] Soap [New]"));
    assert_eq!(record.get_f64("price"), Some(8.0));
}

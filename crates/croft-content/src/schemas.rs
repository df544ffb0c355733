//! Built-in schemas for the site's content types.

use crate::markdown::value::{FrontmatterValue, Mapping};
use crate::schema::{Coercion, FieldSchema, FieldSpec};

/// Image shown for products without one.
pub const PRODUCT_PLACEHOLDER_IMAGE: &str = "images/uploads/placeholder-product.jpg";

/// Photo shown for animals without one.
pub const ANIMAL_PLACEHOLDER_PHOTO: &str = "images/uploads/placeholder-animal.jpg";

/// Order given to documents that do not set one, so they sort last.
pub const DEFAULT_ORDER: i32 = 999;

/// Shop products (`content/products/*.md`).
///
/// `max_quantity` has no default: the cart falls back to stock, then 999.
pub fn product_schema() -> FieldSchema {
    FieldSchema::new()
        .field(
            FieldSpec::new("title")
                .alias("name")
                .coerce(Coercion::String)
                .with_default("Product"),
        )
        .field(FieldSpec::new("price").coerce(Coercion::FloatCurrency).with_default(0))
        .field(FieldSpec::new("weight").coerce(Coercion::FloatCurrency).with_default(0))
        .field(FieldSpec::new("stock").coerce(Coercion::Int).with_default(0))
        .field(FieldSpec::new("order").coerce(Coercion::Int).with_default(DEFAULT_ORDER))
        .field(FieldSpec::new("sku").coerce(Coercion::String))
        .field(
            FieldSpec::new("short_description")
                .alias("description")
                .coerce(Coercion::String)
                .with_default(""),
        )
        .field(
            FieldSpec::new("image")
                .alias("photo")
                .alias("featured_image")
                .coerce(Coercion::String)
                .with_default(PRODUCT_PLACEHOLDER_IMAGE),
        )
        .field(FieldSpec::new("featured").coerce(Coercion::Bool).with_default(false))
        .field(FieldSpec::new("available").coerce(Coercion::Bool).with_default(false))
        .field(FieldSpec::new("category"))
        .field(
            FieldSpec::new("max_quantity")
                .alias("maxQuantity")
                .alias("max_per_customer")
                .coerce(Coercion::Int),
        )
}

/// Animal profiles (`content/animals/*.md`).
pub fn animal_schema() -> FieldSchema {
    FieldSchema::new()
        .field(
            FieldSpec::new("name")
                .alias("title")
                .coerce(Coercion::String)
                .with_default("Unknown"),
        )
        .field(
            FieldSpec::new("photo")
                .alias("featured_image")
                .alias("image")
                .coerce(Coercion::String)
                .with_default(ANIMAL_PLACEHOLDER_PHOTO),
        )
        .field(FieldSpec::new("video_url").coerce(Coercion::String).with_default(""))
        .field(
            FieldSpec::new("short_description")
                .coerce(Coercion::String)
                .with_default("A wonderful animal."),
        )
        .field(FieldSpec::new("text_align").coerce(Coercion::String).with_default("center"))
        .field(FieldSpec::new("order").coerce(Coercion::Int).with_default(DEFAULT_ORDER))
}

/// Single pages (`content/pages/*.md`): a title plus whatever sections the
/// page declares, kept as parsed.
pub fn page_schema() -> FieldSchema {
    FieldSchema::new()
        .field(
            FieldSpec::new("title")
                .alias("page_title")
                .coerce(Coercion::String)
                .with_default(""),
        )
        .field(
            FieldSpec::new("hero_section")
                .alias("hero")
                .with_default(FrontmatterValue::Mapping(Mapping::new())),
        )
}

/// Look up a built-in schema by name.
pub fn schema_by_name(name: &str) -> Option<FieldSchema> {
    match name {
        "product" | "products" => Some(product_schema()),
        "animal" | "animals" => Some(animal_schema()),
        "page" | "pages" => Some(page_schema()),
        _ => None,
    }
}

//! Croft Cart — the shop's cart, persisted to a key-value store.
//!
//! The cart is a single owned aggregate. Every mutation clamps quantities to
//! `[1, max_quantity]` and then writes the whole snapshot back to the store.
//! A failed write is logged and the cart carries on in memory.
//!
//! # Example
//!
//! ```rust
//! use croft_cart::{Cart, MemoryStore, NewItem, CART_STORAGE_KEY};
//!
//! let mut cart = Cart::hydrate(MemoryStore::new(), CART_STORAGE_KEY);
//! let soap = NewItem::new("goat-milk-soap", "Goat Milk Soap", 8.0).with_max_quantity(2);
//!
//! cart.add(soap.clone()).unwrap();
//! cart.add(soap.clone()).unwrap();
//! let err = cart.add(soap).unwrap_err();
//!
//! assert_eq!(err.to_string(), "Sorry, maximum 2 per customer");
//! assert_eq!(cart.totals().item_count, 2);
//! assert_eq!(cart.totals().subtotal, 16.0);
//! ```

pub mod cart;
pub mod error;
pub mod item;
pub mod store;

mod proptests;

pub use cart::{AddOutcome, Cart, CartTotals, CART_STORAGE_KEY};
pub use error::{CartError, Result};
pub use item::{CartItem, NewItem, DEFAULT_MAX_QUANTITY};
pub use store::{FileStore, KeyValueStore, MemoryStore};

//! The cart aggregate.

use crate::error::{CartError, Result};
use crate::item::{CartItem, NewItem};
use crate::store::KeyValueStore;

/// Storage key the site has always used for the cart snapshot.
pub const CART_STORAGE_KEY: &str = "wheatwhisper_cart";

/// What [`Cart::add`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was created with quantity 1.
    Added,
    /// An existing line went up by one, to the given quantity.
    Incremented(u32),
}

/// Cart summary for the header badge and checkout.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CartTotals {
    pub subtotal: f64,
    pub item_count: u32,
}

/// A shopper's cart, persisted on every change.
///
/// Quantities always stay within `[1, max_quantity]`; a line that would drop
/// to zero is removed.
#[derive(Debug)]
pub struct Cart<S: KeyValueStore> {
    store: S,
    key: String,
    items: Vec<CartItem>,
    persistent: bool,
}

impl<S: KeyValueStore> Cart<S> {
    /// Load the cart stored under `key`.
    ///
    /// A missing snapshot gives an empty cart. A corrupt snapshot is logged
    /// and discarded. An unreadable store is logged and the cart runs in
    /// memory only.
    pub fn hydrate(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let mut persistent = true;

        let items = match store.get(&key) {
            Ok(Some(json)) => match serde_json::from_str::<Vec<CartItem>>(&json) {
                Ok(items) => sanitize(items),
                Err(e) => {
                    log::warn!("Discarding unreadable cart snapshot '{key}': {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("Cart storage unavailable, keeping the cart in memory: {e}");
                persistent = false;
                Vec::new()
            }
        };

        log::debug!("Hydrated cart '{key}' with {} lines", items.len());
        Self {
            store,
            key,
            items,
            persistent,
        }
    }

    /// Add one unit of an item.
    ///
    /// # Errors
    ///
    /// [`CartError::MaxQuantityReached`] when the line is already at its
    /// limit; the cart is unchanged.
    pub fn add(&mut self, item: NewItem) -> Result<AddOutcome> {
        let outcome = match self.items.iter_mut().find(|i| i.id == item.id) {
            Some(line) if line.quantity >= line.max_quantity => {
                return Err(CartError::MaxQuantityReached {
                    id: line.id.clone(),
                    max: line.max_quantity,
                });
            }
            Some(line) => {
                line.quantity += 1;
                AddOutcome::Incremented(line.quantity)
            }
            None => {
                self.items.push(item.into_cart_item());
                AddOutcome::Added
            }
        };
        self.persist();
        Ok(outcome)
    }

    /// Remove a line entirely.
    pub fn remove(&mut self, id: &str) -> Result<CartItem> {
        let index = self
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| CartError::UnknownItem(id.to_string()))?;
        let removed = self.items.remove(index);
        self.persist();
        Ok(removed)
    }

    /// Set a line's quantity. `0` removes the line.
    ///
    /// # Errors
    ///
    /// [`CartError::MaxQuantityReached`] above the limit (the old quantity
    /// is kept), [`CartError::UnknownItem`] for an id not in the cart.
    pub fn set_quantity(&mut self, id: &str, quantity: u32) -> Result<()> {
        if quantity == 0 {
            return self.remove(id).map(|_| ());
        }

        let line = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| CartError::UnknownItem(id.to_string()))?;
        if quantity > line.max_quantity {
            return Err(CartError::MaxQuantityReached {
                id: line.id.clone(),
                max: line.max_quantity,
            });
        }
        line.quantity = quantity;
        self.persist();
        Ok(())
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Lines in the order they were added.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Look up a line.
    pub fn get(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Subtotal and number of units.
    pub fn totals(&self) -> CartTotals {
        self.items.iter().fold(CartTotals::default(), |acc, item| CartTotals {
            subtotal: acc.subtotal + item.line_total(),
            item_count: acc.item_count + item.quantity,
        })
    }

    /// Whether changes are still being written to the store.
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Write the snapshot. After the first failure the cart stays in memory
    /// for the rest of the session.
    fn persist(&mut self) {
        if !self.persistent {
            return;
        }
        let json = match serde_json::to_string(&self.items) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not serialize cart: {e}");
                return;
            }
        };
        if let Err(e) = self.store.set(&self.key, &json) {
            log::warn!("Could not save cart, keeping it in memory: {e}");
            self.persistent = false;
        }
    }
}

/// Drop empty lines and clamp quantities from an old or hand-edited snapshot.
fn sanitize(items: Vec<CartItem>) -> Vec<CartItem> {
    items
        .into_iter()
        .filter(|item| item.quantity > 0)
        .map(|mut item| {
            item.max_quantity = item.max_quantity.max(1);
            item.quantity = item.quantity.min(item.max_quantity);
            item
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::DEFAULT_MAX_QUANTITY;
    use crate::store::{FileStore, MemoryStore};
    use tempfile::tempdir;

    fn soap() -> NewItem {
        NewItem::new("soap", "Goat Milk Soap", 8.0)
    }

    fn cart() -> Cart<MemoryStore> {
        Cart::hydrate(MemoryStore::new(), CART_STORAGE_KEY)
    }

    // ------------------------------------------------------------------------
    // Adding
    // ------------------------------------------------------------------------

    #[test]
    fn test_add_new_then_increment() {
        let mut cart = cart();
        assert_eq!(cart.add(soap()).unwrap(), AddOutcome::Added);
        assert_eq!(cart.add(soap()).unwrap(), AddOutcome::Incremented(2));
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.get("soap").map(|i| i.quantity), Some(2));
    }

    #[test]
    fn test_add_clamps_at_max_quantity() {
        let mut cart = cart();
        let item = soap().with_max_quantity(3);
        let results: Vec<_> = (0..5).map(|_| cart.add(item.clone())).collect();

        assert!(results[..3].iter().all(|r| r.is_ok()));
        for rejected in &results[3..] {
            let err = rejected.as_ref().unwrap_err();
            assert_eq!(err.to_string(), "Sorry, maximum 3 per customer");
        }
        assert_eq!(cart.get("soap").map(|i| i.quantity), Some(3));
    }

    #[test]
    fn test_add_with_zero_limit_uses_default() {
        let mut cart = cart();
        let item = NewItem {
            max_quantity: 0,
            ..soap()
        };
        assert_eq!(cart.add(item.clone()).unwrap(), AddOutcome::Added);
        let line = cart.get("soap").unwrap();
        assert_eq!(line.quantity, 1);
        assert_eq!(line.max_quantity, DEFAULT_MAX_QUANTITY);
        assert_eq!(cart.add(item).unwrap(), AddOutcome::Incremented(2));
    }

    // ------------------------------------------------------------------------
    // Updating and removing
    // ------------------------------------------------------------------------

    #[test]
    fn test_set_quantity() {
        let mut cart = cart();
        cart.add(soap().with_max_quantity(5)).unwrap();
        cart.set_quantity("soap", 4).unwrap();
        assert_eq!(cart.get("soap").map(|i| i.quantity), Some(4));
    }

    #[test]
    fn test_set_quantity_above_max_keeps_old_value() {
        let mut cart = cart();
        cart.add(soap().with_max_quantity(2)).unwrap();
        let err = cart.set_quantity("soap", 3).unwrap_err();
        assert!(matches!(err, CartError::MaxQuantityReached { max: 2, .. }));
        assert_eq!(cart.get("soap").map(|i| i.quantity), Some(1));
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = cart();
        cart.add(soap()).unwrap();
        cart.set_quantity("soap", 0).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_unknown_item() {
        let mut cart = cart();
        assert!(matches!(cart.remove("nope"), Err(CartError::UnknownItem(_))));
        assert!(matches!(cart.set_quantity("nope", 1), Err(CartError::UnknownItem(_))));
    }

    #[test]
    fn test_totals() {
        let mut cart = cart();
        cart.add(soap()).unwrap();
        cart.add(soap()).unwrap();
        cart.add(NewItem::new("scarf", "Scarf", 45.5)).unwrap();
        assert_eq!(
            cart.totals(),
            CartTotals {
                subtotal: 61.5,
                item_count: 3
            }
        );
        cart.clear();
        assert_eq!(cart.totals(), CartTotals::default());
    }

    // ------------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------------

    #[test]
    fn test_every_mutation_is_persisted() {
        let mut cart = cart();
        cart.add(soap()).unwrap();
        assert_eq!(
            cart.store().peek(CART_STORAGE_KEY),
            Some(r#"[{"id":"soap","name":"Goat Milk Soap","price":8.0,"image":"","quantity":1,"maxQuantity":999}]"#)
        );
        cart.remove("soap").unwrap();
        assert_eq!(cart.store().peek(CART_STORAGE_KEY), Some("[]"));
    }

    #[test]
    fn test_hydrate_restores_snapshot() {
        let dir = tempdir().unwrap();
        {
            let mut cart = Cart::hydrate(FileStore::new(dir.path()), CART_STORAGE_KEY);
            cart.add(soap()).unwrap();
            cart.add(soap()).unwrap();
        }
        let cart = Cart::hydrate(FileStore::new(dir.path()), CART_STORAGE_KEY);
        assert_eq!(cart.get("soap").map(|i| i.quantity), Some(2));
        assert!(cart.is_persistent());
    }

    #[test]
    fn test_hydrate_corrupt_snapshot_starts_empty() {
        let store = MemoryStore::new().with_value(CART_STORAGE_KEY, "{not json");
        let cart = Cart::hydrate(store, CART_STORAGE_KEY);
        assert!(cart.is_empty());
        assert!(cart.is_persistent());
    }

    #[test]
    fn test_hydrate_sanitizes_quantities() {
        let snapshot = r#"[
            {"id":"a","name":"A","price":1.0,"image":"","quantity":9,"maxQuantity":3},
            {"id":"b","name":"B","price":1.0,"image":"","quantity":0,"maxQuantity":3}
        ]"#;
        let cart = Cart::hydrate(
            MemoryStore::new().with_value(CART_STORAGE_KEY, snapshot),
            CART_STORAGE_KEY,
        );
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.get("a").map(|i| i.quantity), Some(3));
    }

    #[test]
    fn test_unavailable_storage_keeps_cart_in_memory() {
        let mut cart = Cart::hydrate(MemoryStore::unavailable(), CART_STORAGE_KEY);
        assert!(!cart.is_persistent());
        cart.add(soap()).unwrap();
        cart.add(soap()).unwrap();
        assert_eq!(cart.totals().item_count, 2);
    }

    #[test]
    fn test_failed_write_switches_to_memory() {
        struct FlakyStore {
            writes_left: u32,
        }
        impl KeyValueStore for FlakyStore {
            fn get(&self, _key: &str) -> croft_core::Result<Option<String>> {
                Ok(None)
            }
            fn set(&mut self, _key: &str, _value: &str) -> croft_core::Result<()> {
                if self.writes_left == 0 {
                    return Err(croft_core::Error::persistence("quota exceeded"));
                }
                self.writes_left -= 1;
                Ok(())
            }
        }

        let mut cart = Cart::hydrate(FlakyStore { writes_left: 1 }, CART_STORAGE_KEY);
        cart.add(soap()).unwrap();
        assert!(cart.is_persistent());
        cart.add(soap()).unwrap();
        assert!(!cart.is_persistent());
        assert_eq!(cart.get("soap").map(|i| i.quantity), Some(2));
    }
}

//! Property-based tests for the cart invariants.

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::{Cart, KeyValueStore, MemoryStore, NewItem, CART_STORAGE_KEY};
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Add(usize),
        Set(usize, u32),
        Remove(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (0usize..3).prop_map(Op::Add),
            2 => (0usize..3, 0u32..8).prop_map(|(i, q)| Op::Set(i, q)),
            1 => (0usize..3).prop_map(Op::Remove),
        ]
    }

    fn catalog(max: u32) -> Vec<NewItem> {
        ["soap", "scarf", "eggs"]
            .iter()
            .map(|id| NewItem::new(*id, *id, 2.5).with_max_quantity(max))
            .collect()
    }

    proptest! {
        #[test]
        fn test_quantities_stay_in_bounds(max in 1u32..5, ops in prop::collection::vec(op(), 0..40)) {
            let items = catalog(max);
            let mut cart = Cart::hydrate(MemoryStore::new(), CART_STORAGE_KEY);

            for op in ops {
                let _ = match op {
                    Op::Add(i) => cart.add(items[i].clone()).map(|_| ()),
                    Op::Set(i, q) => cart.set_quantity(&items[i].id, q),
                    Op::Remove(i) => cart.remove(&items[i].id).map(|_| ()),
                };
                for line in cart.items() {
                    prop_assert!(line.quantity >= 1 && line.quantity <= max);
                }
            }
        }

        #[test]
        fn test_repeated_adds_clamp(max in 1u32..10, attempts in 1u32..20) {
            let item = NewItem::new("soap", "Soap", 8.0).with_max_quantity(max);
            let mut cart = Cart::hydrate(MemoryStore::new(), CART_STORAGE_KEY);
            let rejected = (0..attempts).filter(|_| cart.add(item.clone()).is_err()).count() as u32;

            prop_assert_eq!(cart.get("soap").unwrap().quantity, attempts.min(max));
            prop_assert_eq!(rejected, attempts.saturating_sub(max));
        }

        #[test]
        fn test_snapshot_restores_same_cart(ops in prop::collection::vec(op(), 0..20)) {
            let items = catalog(4);
            let mut cart = Cart::hydrate(MemoryStore::new(), CART_STORAGE_KEY);
            for op in ops {
                let _ = match op {
                    Op::Add(i) => cart.add(items[i].clone()).map(|_| ()),
                    Op::Set(i, q) => cart.set_quantity(&items[i].id, q),
                    Op::Remove(i) => cart.remove(&items[i].id).map(|_| ()),
                };
            }

            let snapshot = cart.store().get(CART_STORAGE_KEY).unwrap().unwrap_or_else(|| "[]".into());
            let restored = Cart::hydrate(
                MemoryStore::new().with_value(CART_STORAGE_KEY, snapshot),
                CART_STORAGE_KEY,
            );
            prop_assert_eq!(restored.items(), cart.items());
        }
    }
}

//! In-memory cart engine.
//!
//! A cart is an insertion-ordered list of line items keyed by
//! `(product_id, size)`. All operations are total: mutations that reference
//! a missing entry are silent no-ops, and `decrease_qty` never drops a
//! quantity below 1 (removal is a separate, explicit operation).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One `(product, size)` pairing and its quantity. The name, price and image
/// are a point-in-time snapshot taken when the item was first added; they are
/// never re-synced from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartLineItem {
    pub product_id: i64,
    pub name: String,
    pub price: i64,
    pub original_price: Option<i64>,
    pub image: String,
    pub size: Option<String>,
    pub quantity: u32,
}

/// A line item candidate carried by an add request: everything but the
/// quantity, which is always 1 per add.
#[derive(Debug, Clone)]
pub struct LineItemCandidate {
    pub product_id: i64,
    pub name: String,
    pub price: i64,
    pub original_price: Option<i64>,
    pub image: String,
    pub size: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge on a `(product_id, size)` match, otherwise append with
    /// quantity 1. A merge leaves every stored field except the quantity
    /// untouched, including the price snapshot.
    pub fn add(&mut self, candidate: LineItemCandidate) {
        if let Some(item) = self.find_mut(candidate.product_id, candidate.size.as_deref()) {
            item.quantity += 1;
            return;
        }
        self.items.push(CartLineItem {
            product_id: candidate.product_id,
            name: candidate.name,
            price: candidate.price,
            original_price: candidate.original_price,
            image: candidate.image,
            size: candidate.size,
            quantity: 1,
        });
    }

    pub fn increase_qty(&mut self, product_id: i64, size: Option<&str>) {
        if let Some(item) = self.find_mut(product_id, size) {
            item.quantity += 1;
        }
    }

    /// Floor-at-1: a quantity-1 entry is left unchanged. Callers that want
    /// the entry gone must use `remove`.
    pub fn decrease_qty(&mut self, product_id: i64, size: Option<&str>) {
        if let Some(item) = self.find_mut(product_id, size) {
            if item.quantity > 1 {
                item.quantity -= 1;
            }
        }
    }

    pub fn remove(&mut self, product_id: i64, size: Option<&str>) {
        self.items
            .retain(|item| !matches_key(item, product_id, size));
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn total_price(&self) -> i64 {
        self.items
            .iter()
            .map(|item| item.price * i64::from(item.quantity))
            .sum()
    }

    fn find_mut(&mut self, product_id: i64, size: Option<&str>) -> Option<&mut CartLineItem> {
        self.items
            .iter_mut()
            .find(|item| matches_key(item, product_id, size))
    }
}

/// Two requests address the same line item iff product id and size both
/// compare equal. An absent size matches only an absent size.
fn matches_key(item: &CartLineItem, product_id: i64, size: Option<&str>) -> bool {
    item.product_id == product_id && item.size.as_deref() == size
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(product_id: i64, price: i64, size: Option<&str>) -> LineItemCandidate {
        LineItemCandidate {
            product_id,
            name: format!("Product {product_id}"),
            price,
            original_price: None,
            image: String::new(),
            size: size.map(str::to_owned),
        }
    }

    #[test]
    fn repeated_adds_merge_into_one_entry() {
        let mut cart = Cart::new();
        for _ in 0..5 {
            cart.add(candidate(7, 500, Some("M")));
        }
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 5);
    }

    #[test]
    fn merge_keeps_the_original_price_snapshot() {
        let mut cart = Cart::new();
        cart.add(candidate(7, 500, None));
        // Same key, different price: the stored snapshot must win.
        cart.add(candidate(7, 999, None));
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].price, 500);
        assert_eq!(cart.total_price(), 1000);
    }

    #[test]
    fn decrease_floors_at_one() {
        let mut cart = Cart::new();
        cart.add(candidate(1, 100, None));
        cart.decrease_qty(1, None);
        assert_eq!(cart.items()[0].quantity, 1);
        cart.increase_qty(1, None);
        cart.decrease_qty(1, None);
        cart.decrease_qty(1, None);
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn remove_then_add_starts_fresh() {
        let mut cart = Cart::new();
        cart.add(candidate(3, 200, Some("L")));
        cart.increase_qty(3, Some("L"));
        cart.increase_qty(3, Some("L"));
        cart.remove(3, Some("L"));
        assert!(cart.is_empty());
        cart.add(candidate(3, 200, Some("L")));
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn mutations_on_missing_entries_are_no_ops() {
        let mut cart = Cart::new();
        cart.add(candidate(1, 100, None));
        cart.increase_qty(2, None);
        cart.decrease_qty(2, None);
        cart.remove(2, None);
        cart.increase_qty(1, Some("M")); // size mismatch, also a no-op
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn sizes_make_independent_entries() {
        let mut cart = Cart::new();
        cart.add(candidate(7, 500, Some("M")));
        cart.add(candidate(7, 500, Some("L")));
        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.total_item_count(), 2);

        cart.increase_qty(7, Some("M"));
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.items()[1].quantity, 1);

        cart.remove(7, Some("M"));
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].size.as_deref(), Some("L"));
    }

    #[test]
    fn absent_size_does_not_match_concrete_size() {
        let mut cart = Cart::new();
        cart.add(candidate(7, 500, None));
        cart.add(candidate(7, 500, Some("M")));
        assert_eq!(cart.items().len(), 2);
        cart.decrease_qty(7, None);
        cart.remove(7, None);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].size.as_deref(), Some("M"));
    }

    #[test]
    fn totals_hold_after_every_mutation() {
        let mut cart = Cart::new();
        let expect = |cart: &Cart| {
            let total: i64 = cart
                .items()
                .iter()
                .map(|i| i.price * i64::from(i.quantity))
                .sum();
            assert_eq!(cart.total_price(), total);
        };

        cart.add(candidate(7, 500, Some("M")));
        expect(&cart);
        cart.add(candidate(7, 500, Some("M")));
        expect(&cart);
        assert_eq!(cart.total_price(), 1000);
        assert_eq!(cart.total_item_count(), 2);

        cart.add(candidate(9, 250, None));
        expect(&cart);
        cart.decrease_qty(7, Some("M"));
        expect(&cart);
        cart.remove(9, None);
        expect(&cart);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut cart = Cart::new();
        cart.add(candidate(1, 100, None));
        cart.clear();
        assert!(cart.is_empty());
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_item_count(), 0);
        assert_eq!(cart.total_price(), 0);
    }
}

//! The cart itself: an ordered, id-unique list of lines.

use crate::cart::{CartLine, CartPricing, LineItemPricing, Quantity, MAX_QUANTITY, SHIPPING_FEE};
use crate::error::CartError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A shopping cart.
///
/// Insertion order is display order. Serializes as a plain JSON array of
/// lines; deserialization rejects duplicate product ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product.
    ///
    /// An existing line for the same id is incremented and keeps its
    /// original name and price; a new line is appended with quantity one.
    /// Returns [`CartError::QuantityLimit`] without touching the cart when
    /// the existing line is already at the maximum.
    pub fn add(&mut self, line: CartLine) -> Result<&CartLine, CartError> {
        match self.position(&line.id) {
            Some(idx) => {
                let existing = &mut self.lines[idx];
                let Some(next) = existing.quantity.increment() else {
                    return Err(CartError::QuantityLimit {
                        id: existing.id.to_string(),
                        max: MAX_QUANTITY,
                    });
                };
                existing.quantity = next;
                Ok(&self.lines[idx])
            }
            None => {
                self.lines.push(line);
                let last = self.lines.len() - 1;
                Ok(&self.lines[last])
            }
        }
    }

    /// Remove a line. Returns the removed line, or `None` if it wasn't there.
    pub fn remove(&mut self, id: &ProductId) -> Option<CartLine> {
        let idx = self.position(id)?;
        Some(self.lines.remove(idx))
    }

    /// Set a line's quantity, clamped into the allowed range.
    ///
    /// Returns the stored quantity, or `None` if there is no such line.
    pub fn set_quantity(&mut self, id: &ProductId, requested: i64) -> Option<Quantity> {
        let line = self.lines.iter_mut().find(|l| &l.id == id)?;
        line.quantity = Quantity::clamped(requested);
        Some(line.quantity)
    }

    /// Clear all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in display order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get a line by product id.
    pub fn get(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.id == id)
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Sum of price times quantity over all lines.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Total item count (sum of quantities).
    pub fn count(&self) -> u32 {
        self.lines.iter().map(|l| u32::from(l.quantity)).sum()
    }

    /// Subtotal plus the flat shipping fee.
    pub fn grand_total(&self) -> Money {
        self.total() + SHIPPING_FEE
    }

    /// Calculate the full pricing breakdown.
    pub fn pricing(&self) -> CartPricing {
        let line_items = self
            .lines
            .iter()
            .map(|line| LineItemPricing {
                id: line.id.clone(),
                unit_price: line.price,
                quantity: line.quantity.get(),
                subtotal: line.subtotal(),
            })
            .collect();
        let subtotal = self.total();

        CartPricing {
            subtotal,
            shipping_total: SHIPPING_FEE,
            grand_total: subtotal + SHIPPING_FEE,
            item_count: self.count(),
            line_items,
        }
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.lines.iter().position(|l| &l.id == id)
    }
}

impl TryFrom<Vec<CartLine>> for Cart {
    type Error = String;

    fn try_from(lines: Vec<CartLine>) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(lines.len());
        for line in &lines {
            if !seen.insert(line.id.as_str()) {
                return Err(format!("duplicate product id {}", line.id));
            }
        }
        Ok(Self { lines })
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::ProductRef;

    fn widget() -> CartLine {
        ProductRef::new("a1", "Widget", "9.99").validate().unwrap()
    }

    fn gadget() -> CartLine {
        ProductRef::new("b2", "Gadget", "20").validate().unwrap()
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::ZERO);
        assert_eq!(cart.count(), 0);
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let mut cart = Cart::new();
        for _ in 0..3 {
            cart.add(widget()).unwrap();
        }

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.count(), 3);
        assert_eq!(cart.total().cents(), 2997);
    }

    #[test]
    fn test_add_keeps_first_price_and_name() {
        let mut cart = Cart::new();
        cart.add(widget()).unwrap();
        let repriced = ProductRef::new("a1", "Renamed", "1.00").validate().unwrap();
        cart.add(repriced).unwrap();

        let line = cart.get(&ProductId::new("a1")).unwrap();
        assert_eq!(line.name, "Widget");
        assert_eq!(line.price.cents(), 999);
        assert_eq!(line.quantity.get(), 2);
    }

    #[test]
    fn test_quantity_limit() {
        let mut cart = Cart::new();
        for _ in 0..5 {
            cart.add(widget()).unwrap();
        }

        let err = cart.add(widget()).unwrap_err();
        assert_eq!(
            err,
            CartError::QuantityLimit { id: "a1".into(), max: 5 }
        );
        assert_eq!(cart.count(), 5);
        assert_eq!(cart.total().cents(), 4995);
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let mut cart = Cart::new();
        cart.add(gadget()).unwrap();
        cart.add(widget()).unwrap();
        cart.add(gadget()).unwrap();

        let ids: Vec<_> = cart.lines().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["b2", "a1"]);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add(widget()).unwrap();

        assert_eq!(cart.remove(&ProductId::new("a1")).unwrap().name, "Widget");
        assert!(cart.remove(&ProductId::new("a1")).is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_clamps() {
        let mut cart = Cart::new();
        cart.add(widget()).unwrap();
        let id = ProductId::new("a1");

        assert_eq!(cart.set_quantity(&id, 4).unwrap().get(), 4);
        assert_eq!(cart.set_quantity(&id, 0).unwrap().get(), 1);
        assert_eq!(cart.set_quantity(&id, 99).unwrap().get(), 5);
        assert!(cart.set_quantity(&ProductId::new("zz"), 2).is_none());
    }

    #[test]
    fn test_pricing() {
        let mut cart = Cart::new();
        cart.add(widget()).unwrap();
        cart.add(widget()).unwrap();
        cart.add(gadget()).unwrap();

        let pricing = cart.pricing();
        assert_eq!(pricing.subtotal.cents(), 3998);
        assert_eq!(pricing.shipping_total.cents(), 500);
        assert_eq!(pricing.grand_total.cents(), 4498);
        assert_eq!(pricing.item_count, 3);
        assert_eq!(pricing.line_items[0].subtotal.cents(), 1998);
        assert_eq!(cart.grand_total(), pricing.grand_total);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut cart = Cart::new();
        cart.add(widget()).unwrap();
        cart.add(gadget()).unwrap();
        cart.add(widget()).unwrap();

        let json = serde_json::to_string(&cart).unwrap();
        assert!(json.starts_with('['));
        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cart);
    }

    #[test]
    fn test_deserialize_rejects_duplicates() {
        let json = r#"[
            {"id":"a1","name":"Widget","price":9.99,"quantity":1,"icon":"x"},
            {"id":"a1","name":"Widget","price":9.99,"quantity":2,"icon":"x"}
        ]"#;
        assert!(serde_json::from_str::<Cart>(json).is_err());
    }

    #[test]
    fn test_deserialize_defaults_missing_icon() {
        let json = r#"[{"id":"a1","name":"Widget","price":9.99,"quantity":2}]"#;
        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.lines()[0].icon, crate::cart::DEFAULT_ICON);
    }
}

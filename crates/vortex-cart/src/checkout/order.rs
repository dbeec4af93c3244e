//! Order confirmation produced by a successful checkout.

use crate::cart::{Cart, CartLine};
use crate::checkout::OrderForm;
use crate::ids::OrderId;
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Receipt for a placed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderConfirmation {
    /// Order reference shown to the customer.
    pub id: OrderId,
    /// Customer name as entered.
    pub customer: String,
    /// Contact email as entered.
    pub email: String,
    /// Payment method as entered.
    pub payment: String,
    /// Lines as they were at checkout.
    pub lines: Vec<CartLine>,
    /// Sum of quantities.
    pub item_count: u32,
    /// Subtotal before shipping.
    pub subtotal: Money,
    /// Shipping cost.
    pub shipping_total: Money,
    /// Amount confirmed to the customer (subtotal + shipping).
    pub grand_total: Money,
    /// When the order was placed.
    pub placed_at: DateTime<Utc>,
}

impl OrderConfirmation {
    /// Snapshot a cart and a validated form into a confirmation.
    pub(crate) fn from_cart(cart: &Cart, form: &OrderForm) -> Self {
        let pricing = cart.pricing();
        let field = |v: &Option<String>| v.as_deref().unwrap_or_default().trim().to_string();

        Self {
            id: OrderId::generate(),
            customer: field(&form.name),
            email: field(&form.email),
            payment: field(&form.payment),
            lines: cart.lines().to_vec(),
            item_count: pricing.item_count,
            subtotal: pricing.subtotal,
            shipping_total: pricing.shipping_total,
            grand_total: pricing.grand_total,
            placed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::ProductRef;

    #[test]
    fn test_confirmation_snapshot() {
        let mut cart = Cart::new();
        cart.add(ProductRef::new("a1", "Widget", "9.99").validate().unwrap())
            .unwrap();
        let form = OrderForm {
            name: Some(" Ada ".into()),
            email: Some("ada@example.com".into()),
            address: Some("1 Way".into()),
            city: Some("London".into()),
            payment: Some("paypal".into()),
        };

        let confirmation = OrderConfirmation::from_cart(&cart, &form);
        assert_eq!(confirmation.customer, "Ada");
        assert_eq!(confirmation.item_count, 1);
        assert_eq!(confirmation.grand_total.cents(), 1499);
        assert_eq!(confirmation.lines.len(), 1);
    }
}

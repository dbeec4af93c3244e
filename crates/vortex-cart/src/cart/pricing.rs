//! Cart pricing calculations.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Flat shipping fee added to every order.
pub const SHIPPING_FEE: Money = Money::from_cents(500);

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Sum of line subtotals.
    pub subtotal: Money,
    /// Shipping cost.
    pub shipping_total: Money,
    /// Final total (subtotal + shipping).
    pub grand_total: Money,
    /// Sum of quantities.
    pub item_count: u32,
    /// Per-line pricing breakdown.
    pub line_items: Vec<LineItemPricing>,
}

impl CartPricing {
    /// Check if there is nothing to pay for besides shipping.
    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }
}

/// Pricing breakdown for a single line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricing {
    /// Product ID.
    pub id: ProductId,
    /// Unit price.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: u8,
    /// Subtotal (unit_price * quantity).
    pub subtotal: Money,
}

//! Shopping cart module.
//!
//! Contains types for cart, lines, quantities, and pricing.

mod cart;
mod line;
mod pricing;
mod quantity;

pub use cart::Cart;
pub use line::{CartLine, ProductRef, DEFAULT_ICON};
pub use pricing::{CartPricing, LineItemPricing, SHIPPING_FEE};
pub use quantity::{Quantity, MAX_QUANTITY, MIN_QUANTITY};

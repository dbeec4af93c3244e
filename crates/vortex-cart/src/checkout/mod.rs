//! Checkout module.
//!
//! Contains the checkout form and the confirmation it produces.

mod form;
mod order;

pub use form::{OrderForm, PaymentMethod};
pub use order::OrderConfirmation;

//! Cart state machine, pricing and checkout for the Vortex storefront.
//!
//! This crate keeps the list of products a shopper has picked, enforces the
//! rules for adding and bounding them, prices the cart, and persists it
//! through a [`vortex_cache::Cache`]:
//!
//! - **Cart**: ordered, id-unique lines with quantities bounded to `1..=5`
//! - **Pricing**: subtotal, item count, flat shipping, grand total
//! - **Checkout**: form validation and order confirmation
//! - **Store**: [`CartStore`] ties state, storage and observers together
//!
//! # Example
//!
//! ```rust,ignore
//! use vortex_cart::prelude::*;
//! use vortex_cache::Cache;
//!
//! let mut store = CartStore::new(Cache::open_dir("./data")?, DEFAULT_STORAGE_KEY);
//! store.subscribe(renderer);
//! store.load();
//!
//! store.add_item(&ProductRef::new("a1", "Widget", "9.99"))?;
//! println!("Total: {}", store.grand_total());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod checkout;
pub mod observer;
pub mod store;

pub use cart::{Cart, CartLine, CartPricing, ProductRef, Quantity};
pub use error::{CartError, ErrorKind};
pub use ids::*;
pub use money::Money;
pub use observer::{CartChange, CartObserver, Notice, NoticeLevel};
pub use store::{CartStore, LoadOutcome, DEFAULT_STORAGE_KEY};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CartError, ErrorKind};
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Cart
    pub use crate::cart::{
        Cart, CartLine, CartPricing, LineItemPricing, ProductRef, Quantity, DEFAULT_ICON,
        MAX_QUANTITY, MIN_QUANTITY, SHIPPING_FEE,
    };

    // Checkout
    pub use crate::checkout::{OrderConfirmation, OrderForm, PaymentMethod};

    // Store
    pub use crate::observer::{CartChange, CartObserver, Notice, NoticeLevel, RecordingObserver};
    pub use crate::store::{CartStore, LoadOutcome, DEFAULT_STORAGE_KEY};
}

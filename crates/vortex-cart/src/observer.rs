//! Change events and user-facing notices emitted by [`CartStore`](crate::CartStore).

use crate::cart::{Cart, Quantity};
use crate::ids::{OrderId, ProductId};
use serde::Serialize;
use std::fmt;

/// What a successful mutation did to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CartChange {
    ItemAdded { id: ProductId, quantity: Quantity },
    ItemRemoved { id: ProductId },
    QuantityChanged { id: ProductId, quantity: Quantity },
    Emptied,
    CheckedOut { order: OrderId },
    Reloaded,
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "success",
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        }
    }
}

/// A short message meant for the shopper, e.g. a toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level.as_str(), self.message)
    }
}

/// Subscriber to cart activity.
///
/// Called synchronously, after the new state has been handed to storage.
pub trait CartObserver {
    /// The cart changed; `cart` is the state after the change.
    fn cart_changed(&mut self, change: &CartChange, cart: &Cart);

    /// Something worth telling the shopper happened.
    fn notice(&mut self, _notice: &Notice) {}
}

/// Observer that records everything it sees. Handy in tests and for
/// batch callers that report at the end.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    pub changes: Vec<CartChange>,
    pub notices: Vec<Notice>,
}

impl CartObserver for RecordingObserver {
    fn cart_changed(&mut self, change: &CartChange, _cart: &Cart) {
        self.changes.push(change.clone());
    }

    fn notice(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }
}

/// Forward to a shared observer, so the caller can keep a handle to it.
impl<T: CartObserver + ?Sized> CartObserver for std::rc::Rc<std::cell::RefCell<T>> {
    fn cart_changed(&mut self, change: &CartChange, cart: &Cart) {
        self.borrow_mut().cart_changed(change, cart);
    }

    fn notice(&mut self, notice: &Notice) {
        self.borrow_mut().notice(notice);
    }
}

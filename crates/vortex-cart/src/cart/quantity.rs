//! Bounded per-line quantity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest quantity a line can hold.
pub const MIN_QUANTITY: u8 = 1;

/// Largest quantity a line can hold.
pub const MAX_QUANTITY: u8 = 5;

/// Quantity of one cart line, always within `MIN_QUANTITY..=MAX_QUANTITY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Quantity(u8);

impl Quantity {
    /// One item.
    pub const ONE: Quantity = Quantity(MIN_QUANTITY);

    /// The per-line maximum.
    pub const MAX: Quantity = Quantity(MAX_QUANTITY);

    /// Create a quantity if `n` is in range.
    pub fn new(n: u8) -> Option<Self> {
        (MIN_QUANTITY..=MAX_QUANTITY).contains(&n).then_some(Self(n))
    }

    /// Create a quantity by clamping any integer into range.
    pub fn clamped(n: i64) -> Self {
        Self(n.clamp(i64::from(MIN_QUANTITY), i64::from(MAX_QUANTITY)) as u8)
    }

    /// The next quantity up, or `None` at the maximum.
    pub fn increment(self) -> Option<Self> {
        Self::new(self.0 + 1)
    }

    /// Whether this is the per-line maximum.
    pub fn is_max(self) -> bool {
        self.0 == MAX_QUANTITY
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u8> for Quantity {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Self::new(n).ok_or_else(|| {
            format!("quantity {n} outside {MIN_QUANTITY}..={MAX_QUANTITY}")
        })
    }
}

impl From<Quantity> for u8 {
    fn from(q: Quantity) -> u8 {
        q.0
    }
}

impl From<Quantity> for u32 {
    fn from(q: Quantity) -> u32 {
        u32::from(q.0)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

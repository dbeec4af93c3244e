//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations. The cart works in a
//! single, unnamed currency.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};
use std::str::FromStr;
use thiserror::Error;

/// Largest amount a single price may carry, in cents (one billion units).
pub const MAX_PRICE_CENTS: i64 = 100_000_000_000;

const CENTS_PER_UNIT: i64 = 100;

/// A non-negative monetary amount.
///
/// Stored in cents; serialized as a decimal number (`9.99`) so persisted
/// carts stay readable and compatible with plain JSON consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    amount_cents: i64,
}

/// Reasons a price string could not be turned into [`Money`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseMoneyError {
    #[error("price is empty")]
    Empty,
    #[error("price {0:?} is not a number")]
    NotANumber(String),
    #[error("price {0:?} is negative")]
    Negative(String),
    #[error("price {0:?} is too large")]
    TooLarge(String),
}

impl Money {
    /// Zero.
    pub const ZERO: Money = Money { amount_cents: 0 };

    /// Create a new Money value from cents.
    ///
    /// Negative input is clamped to zero; the cart never holds negative amounts.
    pub const fn from_cents(amount_cents: i64) -> Self {
        Self {
            amount_cents: if amount_cents < 0 { 0 } else { amount_cents },
        }
    }

    /// Create a Money value from a decimal amount, rounding to the nearest cent.
    ///
    /// Returns `None` for non-finite, negative, or out-of-range input.
    ///
    /// ```
    /// use vortex_cart::Money;
    /// let price = Money::from_decimal(49.99).unwrap();
    /// assert_eq!(price.cents(), 4999);
    /// ```
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() || amount < 0.0 {
            return None;
        }
        let cents = (amount * CENTS_PER_UNIT as f64).round();
        if cents > MAX_PRICE_CENTS as f64 {
            return None;
        }
        Some(Self::from_cents(cents as i64))
    }

    /// Amount in cents.
    pub fn cents(&self) -> i64 {
        self.amount_cents
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / CENTS_PER_UNIT as f64
    }

    /// Format as a display string without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        format!(
            "{}.{:02}",
            self.amount_cents / CENTS_PER_UNIT,
            self.amount_cents % CENTS_PER_UNIT
        )
    }

    /// Multiply by a quantity.
    pub fn multiply(&self, factor: u32) -> Money {
        Money::from_cents(self.amount_cents.saturating_mul(i64::from(factor)))
    }
}

impl FromStr for Money {
    type Err = ParseMoneyError;

    /// Parse a plain decimal such as `"9.99"`, `"10"`, or `"0.5"`.
    ///
    /// Extra fractional digits round to the nearest cent (`"9.995"` is
    /// 10.00). Surrounding whitespace is ignored. Signs, exponents,
    /// thousands separators and trailing garbage are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseMoneyError::Empty);
        }
        if trimmed.starts_with('-') {
            return Err(ParseMoneyError::Negative(trimmed.to_string()));
        }

        let (whole, frac) = match trimmed.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (trimmed, ""),
        };

        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
            return Err(ParseMoneyError::NotANumber(trimmed.to_string()));
        }

        let too_large = || ParseMoneyError::TooLarge(trimmed.to_string());
        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| too_large())?
        };
        let digit = |i: usize| frac.as_bytes().get(i).map_or(0, |b| i64::from(b - b'0'));
        let mut cents = digit(0) * 10 + digit(1);
        if digit(2) >= 5 {
            cents += 1;
        }

        let total = units
            .checked_mul(CENTS_PER_UNIT)
            .and_then(|u| u.checked_add(cents))
            .filter(|c| *c <= MAX_PRICE_CENTS)
            .ok_or_else(too_large)?;

        Ok(Money::from_cents(total))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::from_cents(self.amount_cents.saturating_add(other.amount_cents))
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, factor: u32) -> Money {
        self.multiply(factor)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_amount())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Money::from_decimal(amount).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid price {amount}: must be between 0 and {MAX_PRICE_CENTS} cents"))
        })
    }
}

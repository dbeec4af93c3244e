//! Cart error types.

use std::fmt;

use thiserror::Error;

/// Errors that can occur in cart operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CartError {
    /// Product data was missing a required field or carried an unusable price.
    #[error("Invalid product data: {0}")]
    InvalidProduct(String),

    /// Checkout form is missing required fields.
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// Incrementing would push a line past the per-item maximum.
    #[error("Quantity limit reached for {id}: at most {max} per item")]
    QuantityLimit { id: String, max: u8 },

    /// Persisted cart could not be decoded.
    #[error("Stored cart is corrupt: {0}")]
    StorageCorrupt(String),

    /// No line with the given product id.
    #[error("Item not in cart: {0}")]
    NotFound(String),

    /// Persisting the cart failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CartError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CartError::InvalidProduct(_) | CartError::MissingFields(_) => ErrorKind::InvalidInput,
            CartError::QuantityLimit { .. } => ErrorKind::QuantityLimit,
            CartError::StorageCorrupt(_) => ErrorKind::StorageCorrupt,
            CartError::NotFound(_) => ErrorKind::NotFound,
            CartError::Storage(_) => ErrorKind::Storage,
        }
    }
}

impl From<vortex_cache::CacheError> for CartError {
    fn from(e: vortex_cache::CacheError) -> Self {
        if e.is_corrupt_data() {
            CartError::StorageCorrupt(e.to_string())
        } else {
            CartError::Storage(e.to_string())
        }
    }
}

/// Coarse error category, as reported to users and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    QuantityLimit,
    StorageCorrupt,
    NotFound,
    Storage,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid-input",
            ErrorKind::QuantityLimit => "quantity-limit",
            ErrorKind::StorageCorrupt => "storage-corrupt",
            ErrorKind::NotFound => "not-found",
            ErrorKind::Storage => "storage",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(
            CartError::InvalidProduct("name".into()).kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            CartError::MissingFields(vec!["email"]).kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            CartError::QuantityLimit { id: "a1".into(), max: 5 }
                .kind()
                .as_str(),
            "quantity-limit"
        );
    }

    #[test]
    fn test_missing_fields_message() {
        let err = CartError::MissingFields(vec!["email", "city"]);
        assert_eq!(err.to_string(), "Missing required fields: email, city");
    }

    #[test]
    fn test_from_cache_error() {
        let bad = serde_json::from_str::<u8>("x").unwrap_err();
        let err: CartError = vortex_cache::CacheError::from(bad).into();
        assert_eq!(err.kind(), ErrorKind::StorageCorrupt);

        let err: CartError = vortex_cache::CacheError::WriteRejected("k".into()).into();
        assert_eq!(err.kind(), ErrorKind::Storage);
    }
}

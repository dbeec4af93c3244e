//! Cart lines and the raw product data that creates them.

use crate::cart::Quantity;
use crate::error::CartError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Glyph shown for products that don't bring their own.
pub const DEFAULT_ICON: &str = "📦";

/// One product's presence in the cart.
///
/// Serialized as `{id, name, price, quantity, icon}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    /// Product being purchased.
    pub id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price, fixed when the line was first added.
    pub price: Money,
    /// Quantity.
    pub quantity: Quantity,
    /// Display glyph.
    #[serde(default = "default_icon")]
    pub icon: String,
}

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

impl CartLine {
    /// Create a line with quantity one.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Money,
        icon: Option<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            quantity: Quantity::ONE,
            icon: icon.filter(|i| !i.trim().is_empty()).unwrap_or_else(default_icon),
        }
    }

    /// Price times quantity.
    pub fn subtotal(&self) -> Money {
        self.price * u32::from(self.quantity)
    }
}

/// Product data as a storefront page hands it over: every field optional,
/// the price still a string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRef {
    pub id: Option<String>,
    pub name: Option<String>,
    pub price: Option<String>,
    pub icon: Option<String>,
}

impl ProductRef {
    /// Product data with every required field present.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            price: Some(price.into()),
            icon: None,
        }
    }

    /// Set the display glyph.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Check required fields and parse the price.
    ///
    /// `id`, `name` and `price` must be present and non-blank; the price
    /// must be a non-negative decimal, rounded to the nearest cent. The id
    /// and name are kept exactly as given.
    pub fn validate(&self) -> Result<CartLine, CartError> {
        let id = required(&self.id, "id")?;
        let name = required(&self.name, "name")?;
        let price_text = required(&self.price, "price")?;

        let price: Money = price_text
            .parse()
            .map_err(|e| CartError::InvalidProduct(format!("{e}")))?;

        Ok(CartLine::new(
            ProductId::new(id),
            name,
            price,
            self.icon.clone(),
        ))
    }
}

fn required<'a>(field: &'a Option<String>, name: &str) -> Result<&'a str, CartError> {
    match field.as_deref() {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(CartError::InvalidProduct(format!("missing {name}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_complete_product() {
        let line = ProductRef::new("a1", "Widget", "9.99")
            .with_icon("🔧")
            .validate()
            .unwrap();

        assert_eq!(line.id.as_str(), "a1");
        assert_eq!(line.name, "Widget");
        assert_eq!(line.price.cents(), 999);
        assert_eq!(line.quantity, Quantity::ONE);
        assert_eq!(line.icon, "🔧");
    }

    #[test]
    fn test_validate_defaults_icon() {
        let line = ProductRef::new("a1", "Widget", "1").validate().unwrap();
        assert_eq!(line.icon, DEFAULT_ICON);

        let line = ProductRef::new("a1", "Widget", "1")
            .with_icon("  ")
            .validate()
            .unwrap();
        assert_eq!(line.icon, DEFAULT_ICON);
    }

    #[test]
    fn test_validate_missing_fields() {
        let mut product = ProductRef::new("a1", "Widget", "9.99");
        product.name = None;
        assert_eq!(
            product.validate(),
            Err(CartError::InvalidProduct("missing name".into()))
        );

        let mut product = ProductRef::new("a1", "Widget", "9.99");
        product.price = Some(String::new());
        assert_eq!(
            product.validate(),
            Err(CartError::InvalidProduct("missing price".into()))
        );

        let product = ProductRef::default();
        assert_eq!(
            product.validate(),
            Err(CartError::InvalidProduct("missing id".into()))
        );
    }

    #[test]
    fn test_validate_rejects_non_numeric_price() {
        let err = ProductRef::new("a1", "Widget", "cheap").validate().unwrap_err();
        assert!(matches!(err, CartError::InvalidProduct(_)));

        let err = ProductRef::new("a1", "Widget", "-2").validate().unwrap_err();
        assert!(matches!(err, CartError::InvalidProduct(_)));
    }

    #[test]
    fn test_validate_keeps_id_verbatim() {
        let line = ProductRef::new(" a1 ", "Widget ", "9.99").validate().unwrap();
        assert_eq!(line.id.as_str(), " a1 ");
        assert_eq!(line.name, "Widget ");

        let blank = ProductRef::new("   ", "Widget", "9.99").validate();
        assert_eq!(blank, Err(CartError::InvalidProduct("missing id".into())));
    }

    #[test]
    fn test_zero_price_is_allowed() {
        let line = ProductRef::new("free", "Sticker", "0").validate().unwrap();
        assert!(line.price.is_zero());
    }

    #[test]
    fn test_line_serialization_shape() {
        let line = ProductRef::new("a1", "Widget", "9.99").validate().unwrap();
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "a1",
                "name": "Widget",
                "price": 9.99,
                "quantity": 1,
                "icon": DEFAULT_ICON,
            })
        );
    }

    #[test]
    fn test_subtotal() {
        let mut line = ProductRef::new("a1", "Widget", "9.99").validate().unwrap();
        line.quantity = Quantity::new(3).unwrap();
        assert_eq!(line.subtotal().cents(), 2997);
    }
}

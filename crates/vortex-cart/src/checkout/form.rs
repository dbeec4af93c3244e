//! Checkout form input.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fields the checkout form collects, all required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderForm {
    /// Customer's full name.
    pub name: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Street and house number.
    pub address: Option<String>,
    /// City and postal code.
    pub city: Option<String>,
    /// Payment method as submitted (`card`, `paypal`, `transfer`).
    pub payment: Option<String>,
}

impl OrderForm {
    /// Names of absent or blank fields, in form order.
    ///
    /// Only presence is checked; whether `payment` names a known
    /// [`PaymentMethod`] is up to the caller collecting the input.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let fields: [(&'static str, &Option<String>); 5] = [
            ("name", &self.name),
            ("email", &self.email),
            ("address", &self.address),
            ("city", &self.city),
            ("payment", &self.payment),
        ];
        fields
            .into_iter()
            .filter(|(_, value)| value.as_deref().map_or(true, |v| v.trim().is_empty()))
            .map(|(name, _)| name)
            .collect()
    }

    /// Check if every required field is filled in.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// Payment methods offered at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Credit card.
    Card,
    /// PayPal.
    Paypal,
    /// Bank transfer.
    Transfer,
}

impl PaymentMethod {
    /// All methods, in the order they are offered.
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::Card,
        PaymentMethod::Paypal,
        PaymentMethod::Transfer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Paypal => "paypal",
            PaymentMethod::Transfer => "transfer",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Credit card",
            PaymentMethod::Paypal => "PayPal",
            PaymentMethod::Transfer => "Bank transfer",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "card" => Ok(PaymentMethod::Card),
            "paypal" => Ok(PaymentMethod::Paypal),
            "transfer" => Ok(PaymentMethod::Transfer),
            other => Err(format!(
                "unknown payment method {other:?} (expected card, paypal or transfer)"
            )),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

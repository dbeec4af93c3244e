//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Product ID.
    #[arg(long)]
    pub id: Option<String>,

    /// Product name.
    #[arg(long)]
    pub name: Option<String>,

    /// Unit price, e.g. 9.99.
    #[arg(long)]
    pub price: Option<String>,

    /// Display glyph.
    #[arg(long)]
    pub icon: Option<String>,
}

/// Arguments for commands that target one line.
#[derive(Args)]
pub struct LineArgs {
    /// Product ID.
    pub id: String,
}

/// Arguments for the set command.
#[derive(Args)]
pub struct SetArgs {
    /// Product ID.
    pub id: String,

    /// New quantity (clamped to 1-5).
    #[arg(allow_hyphen_values = true)]
    pub quantity: String,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Full name.
    #[arg(long)]
    pub name: Option<String>,

    /// Email address.
    #[arg(long)]
    pub email: Option<String>,

    /// Street and house number.
    #[arg(long)]
    pub address: Option<String>,

    /// City and postal code.
    #[arg(long)]
    pub city: Option<String>,

    /// Payment method: card, paypal or transfer.
    #[arg(long)]
    pub payment: Option<String>,

    /// Never prompt for missing fields.
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Print the config file in use.
    Path,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,

        /// File format: toml or json.
        #[arg(long, default_value = "toml")]
        format: String,
    },
}

/// Parse a quantity typed by a user.
///
/// Fractions are floored (`"2.7"` is 2, `"-0.5"` is -1); range clamping is
/// left to the store.
pub fn parse_quantity(input: &str) -> Result<i64> {
    let trimmed = input.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return Ok(n);
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n.floor().clamp(i64::MIN as f64, i64::MAX as f64) as i64),
        _ => bail!("Quantity must be a number, got {:?}", input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("3").unwrap(), 3);
        assert_eq!(parse_quantity(" 2.7 ").unwrap(), 2);
        assert_eq!(parse_quantity("-0.5").unwrap(), -1);
        assert_eq!(parse_quantity("1e3").unwrap(), 1000);
        assert!(parse_quantity("three").is_err());
        assert!(parse_quantity("NaN").is_err());
        assert!(parse_quantity("").is_err());
    }
}

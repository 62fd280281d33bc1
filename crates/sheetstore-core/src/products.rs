//! Catalog product types shared by the importer, publisher, and storefront.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Image shown for products whose sheet row had no usable image URL.
pub const DEFAULT_PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/400x400?text=No+Image";

/// A product price as it arrived: spreadsheet cells are text, API clients may
/// send JSON numbers.
///
/// The value is kept verbatim for display; [`Price::amount`] is the numeric
/// view used for totals and persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Number(f64),
    Text(String),
}

impl Price {
    /// Parses the price as a non-negative decimal amount.
    ///
    /// Returns `None` for blank, non-numeric, non-finite, or negative values.
    /// Scientific notation (`"1e3"`) is accepted for text prices.
    #[must_use]
    pub fn amount(&self) -> Option<Decimal> {
        let parsed = match self {
            Price::Number(n) if n.is_finite() => Decimal::from_str(&n.to_string()).ok(),
            Price::Number(_) => None,
            Price::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    None
                } else {
                    Decimal::from_str(s)
                        .or_else(|_| Decimal::from_scientific(s))
                        .ok()
                }
            }
        }?;

        if parsed.is_sign_negative() && !parsed.is_zero() {
            return None;
        }
        Some(parsed.normalize())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Number(n) => write!(f, "{n}"),
            Price::Text(s) => write!(f, "{}", s.trim()),
        }
    }
}

impl From<&str> for Price {
    fn from(value: &str) -> Self {
        Price::Text(value.to_string())
    }
}

impl From<Decimal> for Price {
    fn from(value: Decimal) -> Self {
        Price::Text(value.normalize().to_string())
    }
}

/// A catalog entry, either freshly imported from a sheet or loaded from a
/// published store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique within one catalog.
    pub id: String,
    pub name: String,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Product {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: impl Into<Price>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price: price.into(),
            description: None,
            image: None,
            category: None,
        }
    }
}

//! Validation that turns an in-memory catalog into something persistable.
//!
//! Everything here runs before the first database call, so a rejected
//! publish never leaves partial records behind.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::order::normalize_contact;
use crate::products::Product;
use crate::theme::{ColorRoles, PresetKind, ThemeError};

/// Store name used when the merchant leaves the field blank.
pub const DEFAULT_STORE_NAME: &str = "My Store";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PublishError {
    #[error("cannot publish an empty catalog")]
    EmptyCatalog,

    #[error("a contact number is required to publish")]
    NoContact,

    #[error("product {product_id} has no name")]
    MissingName { product_id: String },

    #[error("product {product_id} has invalid price \"{price}\"")]
    InvalidPrice { product_id: String, price: String },

    #[error(transparent)]
    InvalidTheme(#[from] ThemeError),
}

/// One product row as it will be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishProduct {
    pub name: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    /// Zero-based catalog position; storefronts list products in this order.
    pub position: i32,
}

/// A validated store plus its products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishPlan {
    pub name: String,
    pub sheets_url: String,
    pub whatsapp_number: String,
    pub theme: Option<PresetKind>,
    pub theme_colors: Option<ColorRoles>,
    pub products: Vec<PublishProduct>,
}

/// Checks publish preconditions and coerces every price to a decimal.
///
/// # Errors
///
/// - [`PublishError::EmptyCatalog`] when `catalog` is empty.
/// - [`PublishError::NoContact`] when `whatsapp_number` has no digits, since
///   orders could never reach it.
/// - [`PublishError::MissingName`] / [`PublishError::InvalidPrice`] for the
///   first product that cannot be persisted. One bad product rejects the
///   whole catalog.
/// - [`PublishError::InvalidTheme`] when `theme_colors` holds a non-hex color.
pub fn prepare_publish(
    name: &str,
    sheets_url: &str,
    whatsapp_number: &str,
    theme: Option<PresetKind>,
    theme_colors: Option<ColorRoles>,
    catalog: &[Product],
) -> Result<PublishPlan, PublishError> {
    if catalog.is_empty() {
        return Err(PublishError::EmptyCatalog);
    }
    let whatsapp_number = whatsapp_number.trim();
    if normalize_contact(whatsapp_number).is_empty() {
        return Err(PublishError::NoContact);
    }

    let products = catalog
        .iter()
        .zip(0_i32..)
        .map(|(product, position)| to_publish_product(product, position))
        .collect::<Result<Vec<_>, _>>()?;
    if let Some(colors) = &theme_colors {
        colors.validate()?;
    }

    let name = name.trim();
    Ok(PublishPlan {
        name: if name.is_empty() {
            DEFAULT_STORE_NAME.to_string()
        } else {
            name.to_string()
        },
        sheets_url: sheets_url.trim().to_string(),
        whatsapp_number: whatsapp_number.to_string(),
        theme,
        theme_colors,
        products,
    })
}

fn to_publish_product(product: &Product, position: i32) -> Result<PublishProduct, PublishError> {
    let name = product.name.trim();
    if name.is_empty() {
        return Err(PublishError::MissingName {
            product_id: product.id.clone(),
        });
    }

    let price = product
        .price
        .amount()
        .ok_or_else(|| PublishError::InvalidPrice {
            product_id: product.id.clone(),
            price: product.price.to_string(),
        })?;

    Ok(PublishProduct {
        name: name.to_string(),
        price,
        description: non_blank(product.description.as_deref()),
        image_url: non_blank(product.image.as_deref()),
        category: non_blank(product.category.as_deref()),
        position,
    })
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
}

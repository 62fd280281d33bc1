//! Buyer selection state and the order message sent over WhatsApp.

use std::collections::BTreeSet;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::products::Product;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    #[error("store has no contact number configured")]
    NoContact,

    #[error("no products selected")]
    EmptySelection,

    #[error("order total is too large to compute")]
    TotalOverflow,
}

/// Product ids a buyer has picked on a storefront. Lives for one page view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    ids: BTreeSet<String>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects `id` if it is not selected, deselects it otherwise.
    ///
    /// Returns `true` when the id is selected after the call.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Selection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// A composed order, ready to be handed to the messaging deep link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderMessage {
    pub contact: String,
    pub text: String,
    pub item_count: usize,
    pub total: Decimal,
}

impl OrderMessage {
    /// The deep link that opens a chat with the store, message pre-filled.
    #[must_use]
    pub fn deep_link(&self, messaging_base_url: &str) -> String {
        deep_link(messaging_base_url, &self.contact, &self.text)
    }
}

/// Builds `<base>/<contact>?text=<percent-encoded text>`.
#[must_use]
pub fn deep_link(messaging_base_url: &str, contact: &str, text: &str) -> String {
    format!(
        "{}/{}?text={}",
        messaging_base_url.trim_end_matches('/'),
        contact,
        utf8_percent_encode(text, NON_ALPHANUMERIC)
    )
}

/// Reduces a phone-number-like contact to the digits the deep link expects
/// (`"+1 (555) 010-2030"` → `"15550102030"`).
#[must_use]
pub fn normalize_contact(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Composes the order message for the selected products of a store.
///
/// Lines follow catalog order. Ids in `selection` that match no product are
/// ignored. A price that does not parse contributes zero to the total but is
/// still listed as written.
///
/// # Errors
///
/// - [`OrderError::NoContact`] when `contact` has no digits.
/// - [`OrderError::EmptySelection`] when no selected id matches a product.
/// - [`OrderError::TotalOverflow`] when the prices sum past what a
///   [`Decimal`] can hold.
pub fn compose_order(
    store_name: &str,
    contact: &str,
    products: &[Product],
    selection: &Selection,
) -> Result<OrderMessage, OrderError> {
    let contact = normalize_contact(contact);
    if contact.is_empty() {
        return Err(OrderError::NoContact);
    }
    if selection.is_empty() {
        return Err(OrderError::EmptySelection);
    }

    let selected: Vec<&Product> = products
        .iter()
        .filter(|p| selection.contains(&p.id))
        .collect();
    if selected.is_empty() {
        return Err(OrderError::EmptySelection);
    }

    let mut total = Decimal::ZERO;
    let mut lines = Vec::with_capacity(selected.len());
    for product in &selected {
        if let Some(amount) = product.price.amount() {
            total = total
                .checked_add(amount)
                .ok_or(OrderError::TotalOverflow)?;
        }
        lines.push(format!("• {} - {}", product.name, product.price));
    }
    let total = total.normalize();

    let text = format!(
        "Hello! I'd like to order from {store_name}:\n\n{}\n\nItems: {}\nTotal: {total}",
        lines.join("\n"),
        selected.len(),
    );

    Ok(OrderMessage {
        contact,
        text,
        item_count: selected.len(),
        total,
    })
}

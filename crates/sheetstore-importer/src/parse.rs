//! Maps CSV text from a sheet export onto catalog products.

use std::collections::HashSet;

use reqwest::Url;
use serde::Serialize;
use sheetstore_core::{Price, Product};

use crate::error::ImportError;
use crate::tokenize::{split_records, tokenize_line};

const REQUIRED_COLUMNS: [&str; 2] = ["name", "price"];

/// A data row that was dropped during import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// 1-based record number in the sheet, header included.
    pub row: usize,
    pub reason: &'static str,
}

/// Result of importing one sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportedCatalog {
    pub products: Vec<Product>,
    pub skipped_rows: Vec<SkippedRow>,
}

/// Column positions resolved from the header record.
#[derive(Debug, Default)]
struct Columns {
    id: Option<usize>,
    name: Option<usize>,
    price: Option<usize>,
    description: Option<usize>,
    image: Option<usize>,
    category: Option<usize>,
}

impl Columns {
    fn from_header(header: &[String]) -> Self {
        let mut columns = Columns::default();
        for (i, raw) in header.iter().enumerate() {
            let slot = match raw.to_lowercase().as_str() {
                "id" => &mut columns.id,
                "name" => &mut columns.name,
                "price" => &mut columns.price,
                "description" => &mut columns.description,
                "image" | "image_url" => &mut columns.image,
                "category" => &mut columns.category,
                _ => continue,
            };
            // First occurrence wins when a header repeats.
            slot.get_or_insert(i);
        }
        columns
    }

    fn missing_required(&self) -> Vec<String> {
        REQUIRED_COLUMNS
            .iter()
            .zip([self.name, self.price])
            .filter(|(_, idx)| idx.is_none())
            .map(|(name, _)| (*name).to_string())
            .collect()
    }
}

fn cell(fields: &[String], idx: Option<usize>) -> Option<&str> {
    idx.and_then(|i| fields.get(i))
        .map(String::as_str)
        .filter(|v| !v.is_empty())
}

/// Returns `raw` when it is an absolute http(s) URL, `placeholder` otherwise.
///
/// Blank and malformed values both fall back; nothing is fetched.
#[must_use]
pub fn sanitize_image(raw: Option<&str>, placeholder: &str) -> String {
    raw.map(str::trim)
        .filter(|v| {
            Url::parse(v)
                .is_ok_and(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        })
        .unwrap_or(placeholder)
        .to_string()
}

/// Parses CSV text into a catalog.
///
/// The first record is the header; names are matched case-insensitively.
/// Rows with an empty `name` or `price` cell are skipped. Each product takes
/// its `id` cell when present and not already used, otherwise its 1-based
/// position among the surviving rows.
///
/// # Errors
///
/// - [`ImportError::MissingRequiredColumns`] when the header lacks `name`
///   or `price` (also for empty input).
/// - [`ImportError::EmptyCatalog`] when no data row survives.
pub fn parse_catalog(
    text: &str,
    placeholder_image_url: &str,
) -> Result<ImportedCatalog, ImportError> {
    let mut records = split_records(text).into_iter();
    let header = records.next().map(tokenize_line).unwrap_or_default();
    let columns = Columns::from_header(&header);

    let missing = columns.missing_required();
    if !missing.is_empty() {
        return Err(ImportError::MissingRequiredColumns { missing });
    }

    let mut products = Vec::new();
    let mut skipped_rows = Vec::new();
    let mut used_ids: HashSet<String> = HashSet::new();

    for (offset, record) in records.enumerate() {
        let row = offset + 2;
        let fields = tokenize_line(record);

        let Some(name) = cell(&fields, columns.name) else {
            tracing::debug!(row, "skipping row without a name");
            skipped_rows.push(SkippedRow {
                row,
                reason: "missing name",
            });
            continue;
        };
        let Some(price) = cell(&fields, columns.price) else {
            tracing::debug!(row, name, "skipping row without a price");
            skipped_rows.push(SkippedRow {
                row,
                reason: "missing price",
            });
            continue;
        };

        let position = products.len() + 1;
        let id = match cell(&fields, columns.id) {
            Some(explicit) if !used_ids.contains(explicit) => explicit.to_string(),
            explicit => {
                if let Some(dup) = explicit {
                    tracing::debug!(row, id = dup, "duplicate id; using position instead");
                }
                fallback_id(position, &used_ids)
            }
        };
        used_ids.insert(id.clone());

        let mut product = Product::new(id, name, Price::Text(price.to_string()));
        product.description = cell(&fields, columns.description).map(ToOwned::to_owned);
        product.category = cell(&fields, columns.category).map(ToOwned::to_owned);
        product.image = Some(sanitize_image(
            cell(&fields, columns.image),
            placeholder_image_url,
        ));
        products.push(product);
    }

    if products.is_empty() {
        return Err(ImportError::EmptyCatalog);
    }

    Ok(ImportedCatalog {
        products,
        skipped_rows,
    })
}

fn fallback_id(position: usize, used: &HashSet<String>) -> String {
    let base = position.to_string();
    if !used.contains(&base) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}-{n}");
        if !used.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;

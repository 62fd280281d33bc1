pub mod client;
pub mod error;
pub mod parse;
pub mod sheet_url;
pub mod tokenize;

pub use client::SheetClient;
pub use error::ImportError;
pub use parse::{parse_catalog, sanitize_image, ImportedCatalog, SkippedRow};
pub use sheet_url::{csv_export_url, extract_sheet_id};
pub use tokenize::{split_records, tokenize_line};

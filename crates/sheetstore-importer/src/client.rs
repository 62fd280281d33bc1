//! HTTP client for spreadsheet CSV exports.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;

use crate::error::ImportError;
use crate::parse::{parse_catalog, ImportedCatalog};
use crate::sheet_url::csv_export_url;

/// Fetches a shared spreadsheet as CSV and turns it into a catalog.
///
/// One request per import, no retries. A failed fetch is reported to the
/// merchant, who can simply submit the link again.
pub struct SheetClient {
    client: Client,
    placeholder_image_url: String,
}

impl SheetClient {
    /// Creates a `SheetClient` with configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        placeholder_image_url: impl Into<String>,
    ) -> Result<Self, ImportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            placeholder_image_url: placeholder_image_url.into(),
        })
    }

    /// Image URL substituted for rows without a usable one.
    #[must_use]
    pub fn placeholder_image_url(&self) -> &str {
        &self.placeholder_image_url
    }

    /// Downloads the CSV export behind a share link.
    ///
    /// The URL is validated before any network traffic happens.
    ///
    /// # Errors
    ///
    /// - [`ImportError::InvalidUrl`] for links without a sheet id.
    /// - [`ImportError::Http`] for network or TLS failures and timeouts.
    /// - [`ImportError::UnexpectedStatus`] for any non-2xx response.
    /// - [`ImportError::NotCsv`] when the host answers with an HTML page,
    ///   which is what a private sheet's sign-in redirect looks like.
    /// - [`ImportError::NotUtf8`] when the body is not UTF-8.
    pub async fn fetch_csv(&self, sheet_url: &str) -> Result<String, ImportError> {
        let url = csv_export_url(sheet_url)?;
        tracing::debug!(%url, "fetching sheet export");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "text/csv,text/plain;q=0.9,*/*;q=0.8")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImportError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();
        if content_type.starts_with("text/html") {
            return Err(ImportError::NotCsv { url, content_type });
        }

        let body = response.bytes().await?;
        String::from_utf8(body.to_vec()).map_err(|_| ImportError::NotUtf8 { url })
    }

    /// Fetches and parses a sheet in one step.
    ///
    /// # Errors
    ///
    /// Any error from [`SheetClient::fetch_csv`] or [`parse_catalog`].
    pub async fn fetch_catalog(&self, sheet_url: &str) -> Result<ImportedCatalog, ImportError> {
        let text = self.fetch_csv(sheet_url).await?;
        let catalog = parse_catalog(&text, &self.placeholder_image_url)?;
        tracing::info!(
            products = catalog.products.len(),
            skipped = catalog.skipped_rows.len(),
            "sheet imported"
        );
        Ok(catalog)
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("invalid spreadsheet URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("expected CSV from {url} but received {content_type}; is the sheet shared publicly?")]
    NotCsv { url: String, content_type: String },

    #[error("response from {url} is not valid UTF-8")]
    NotUtf8 { url: String },

    #[error("sheet is missing required columns: {}", missing.join(", "))]
    MissingRequiredColumns { missing: Vec<String> },

    #[error("sheet contains no valid products")]
    EmptyCatalog,
}

impl ImportError {
    /// Stable machine-readable code for API responses.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ImportError::InvalidUrl { .. } => "invalid_url",
            ImportError::Http(_)
            | ImportError::UnexpectedStatus { .. }
            | ImportError::NotCsv { .. }
            | ImportError::NotUtf8 { .. } => "fetch_failed",
            ImportError::MissingRequiredColumns { .. } => "missing_required_columns",
            ImportError::EmptyCatalog => "empty_catalog",
        }
    }

    /// True for failures that happened while talking to the sheet host.
    #[must_use]
    pub fn is_fetch_failure(&self) -> bool {
        self.code() == "fetch_failed"
    }
}

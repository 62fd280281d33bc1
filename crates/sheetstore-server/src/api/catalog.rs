use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use sheetstore_core::Product;
use sheetstore_importer::{ImportError, SkippedRow};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct ImportRequest {
    pub sheets_url: String,
}

#[derive(Debug, Serialize)]
pub(super) struct ImportData {
    products: Vec<Product>,
    count: usize,
    skipped_rows: Vec<SkippedRow>,
}

pub(super) fn map_import_error(request_id: String, error: &ImportError) -> ApiError {
    if error.is_fetch_failure() {
        tracing::warn!(error = %error, "sheet fetch failed");
    } else {
        tracing::debug!(error = %error, "sheet rejected");
    }
    ApiError::new(request_id, error.code(), error.to_string())
}

/// Fetches a shared sheet and returns the catalog for review. Nothing is
/// persisted until the merchant publishes.
pub(super) async fn import_catalog(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<ImportRequest>,
) -> Result<Json<ApiResponse<ImportData>>, ApiError> {
    let catalog = state
        .sheets
        .fetch_catalog(&body.sheets_url)
        .await
        .map_err(|e| map_import_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(
        req_id.0,
        ImportData {
            count: catalog.products.len(),
            products: catalog.products,
            skipped_rows: catalog.skipped_rows,
        },
    )))
}

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use sheetstore_core::{
    prepare_publish, ColorRoles, PresetKind, Product, PublishError, Store, ThemeError,
};
use sheetstore_importer::sanitize_image;

use crate::middleware::RequestId;

use super::themes::ThemeItem;
use super::{map_db_error, ApiError, ApiResponse, AppState};

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(super) struct PublishRequest {
    #[serde(default)]
    pub name: String,
    pub sheets_url: String,
    #[serde(default)]
    pub whatsapp_number: String,
    pub theme: Option<String>,
    pub theme_colors: Option<ColorRoles>,
    #[serde(default)]
    pub products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RenameStoreRequest {
    pub name: String,
}

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(super) struct PublishedStore {
    store: Store,
    product_count: usize,
    storefront_path: String,
}

#[derive(Debug, Serialize)]
pub(super) struct StorefrontData {
    store: Store,
    products: Vec<Product>,
    theme: ThemeItem,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn map_publish_error(request_id: String, error: &PublishError) -> ApiError {
    let code = match error {
        PublishError::EmptyCatalog => "empty_catalog",
        PublishError::NoContact => "no_contact",
        PublishError::MissingName { .. }
        | PublishError::InvalidPrice { .. }
        | PublishError::InvalidTheme(_) => "validation_error",
    };
    ApiError::new(request_id, code, error.to_string())
}

fn parse_theme(req_id: &str, raw: Option<&str>) -> Result<Option<PresetKind>, ApiError> {
    raw.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| t.parse::<PresetKind>())
        .transpose()
        .map_err(|e: ThemeError| ApiError::new(req_id, "validation_error", e.to_string()))
}

/// Loads a store and its products in catalog order.
pub(super) async fn load_store(
    state: &AppState,
    req_id: &str,
    id: i64,
) -> Result<(Store, Vec<Product>), ApiError> {
    let store = sheetstore_db::get_store(&state.pool, id)
        .await
        .map_err(|e| map_db_error(req_id.to_owned(), &e))?;
    let products = sheetstore_db::list_store_products(&state.pool, id)
        .await
        .map_err(|e| map_db_error(req_id.to_owned(), &e))?
        .into_iter()
        .map(Product::from)
        .collect();
    Ok((store, products))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Persists a reviewed catalog as a new store.
///
/// Every precondition is checked before the database is touched; the store
/// and its products are then written in one transaction.
pub(super) async fn publish(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<PublishRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PublishedStore>>), ApiError> {
    let theme = parse_theme(&req_id.0, body.theme.as_deref())?;

    // Edited products may carry an image URL that never went through import.
    let placeholder = state.sheets.placeholder_image_url();
    let products: Vec<Product> = body
        .products
        .into_iter()
        .map(|mut product| {
            product.image = Some(sanitize_image(product.image.as_deref(), placeholder));
            product
        })
        .collect();

    let plan = prepare_publish(
        &body.name,
        &body.sheets_url,
        &body.whatsapp_number,
        theme,
        body.theme_colors,
        &products,
    )
    .map_err(|e| map_publish_error(req_id.0.clone(), &e))?;

    let store = sheetstore_db::publish_store(&state.pool, &plan)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "publish failed");
            ApiError::new(
                req_id.0.clone(),
                "publish_failed",
                "store could not be saved, please try again",
            )
        })?;

    tracing::info!(
        store_id = store.id,
        products = plan.products.len(),
        "store published"
    );

    let data = PublishedStore {
        storefront_path: format!("/api/v1/stores/{}", store.id),
        product_count: plan.products.len(),
        store,
    };
    Ok((StatusCode::CREATED, Json(ApiResponse::new(req_id.0, data))))
}

pub(super) async fn get_storefront(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<StorefrontData>>, ApiError> {
    let (store, products) = load_store(&state, &req_id.0, id).await?;
    let theme = store.theme_context();

    Ok(Json(ApiResponse::new(
        req_id.0,
        StorefrontData {
            store,
            products,
            theme: theme.into(),
        },
    )))
}

pub(super) async fn rename_store(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<i64>,
    Json(body): Json<RenameStoreRequest>,
) -> Result<Json<ApiResponse<Store>>, ApiError> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "name must not be empty",
        ));
    }

    let store = sheetstore_db::update_store_name(&state.pool, id, name)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(req_id.0, store)))
}

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sheetstore_core::{compose_order, OrderError, Selection};

use crate::middleware::RequestId;

use super::stores::load_store;
use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct OrderRequest {
    pub product_ids: Selection,
}

#[derive(Debug, Serialize)]
pub(super) struct OrderData {
    message: String,
    item_count: usize,
    total: Decimal,
    deep_link: String,
}

fn map_order_error(request_id: String, error: &OrderError) -> ApiError {
    let code = match error {
        OrderError::NoContact => "no_contact",
        OrderError::EmptySelection => "empty_selection",
        OrderError::TotalOverflow => "total_overflow",
    };
    ApiError::new(request_id, code, error.to_string())
}

/// Composes the order message for a buyer's selection and returns the deep
/// link that opens the chat. No order is recorded.
pub(super) async fn create_order(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<i64>,
    Json(body): Json<OrderRequest>,
) -> Result<Json<ApiResponse<OrderData>>, ApiError> {
    let (store, products) = load_store(&state, &req_id.0, id).await?;

    let order = compose_order(
        &store.name,
        &store.whatsapp_number,
        &products,
        &body.product_ids,
    )
    .map_err(|e| map_order_error(req_id.0.clone(), &e))?;

    tracing::debug!(store_id = id, items = order.item_count, "order composed");

    let data = OrderData {
        deep_link: order.deep_link(&state.messaging_base_url),
        message: order.text,
        item_count: order.item_count,
        total: order.total,
    };
    Ok(Json(ApiResponse::new(req_id.0, data)))
}

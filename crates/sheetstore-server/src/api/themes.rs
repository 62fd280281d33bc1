use std::collections::BTreeMap;

use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use sheetstore_core::{resolve_preset, ColorRoles, Preset, PresetKind, ThemeContext};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse};

#[derive(Debug, Deserialize)]
pub(super) struct ResolveThemeRequest {
    #[serde(default)]
    pub prompt: String,
    /// Replaces the resolved preset's palette.
    pub colors: Option<ColorRoles>,
}

/// A preset together with the CSS it renders to.
#[derive(Debug, Serialize)]
pub(super) struct ThemeItem {
    #[serde(flatten)]
    preset: Preset,
    variables: BTreeMap<String, String>,
    css: String,
}

impl From<ThemeContext> for ThemeItem {
    fn from(context: ThemeContext) -> Self {
        Self {
            variables: context.variables(),
            css: context.to_css(),
            preset: context.preset,
        }
    }
}

pub(super) async fn list_themes(
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<ThemeItem>>> {
    let data: Vec<ThemeItem> = PresetKind::ALL
        .into_iter()
        .map(|kind| ThemeContext::from(kind).into())
        .collect();
    Json(ApiResponse::new(req_id.0, data))
}

/// Resolves free text to a preset. Unmatched text gets the default preset;
/// only a malformed custom color set is rejected.
pub(super) async fn resolve_theme(
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<ResolveThemeRequest>,
) -> Result<Json<ApiResponse<ThemeItem>>, ApiError> {
    let mut preset = resolve_preset(&body.prompt);
    if let Some(colors) = body.colors {
        preset = preset
            .with_colors(colors)
            .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))?;
    }
    tracing::debug!(prompt = %body.prompt, preset = %preset.name, "theme resolved");
    Ok(Json(ApiResponse::new(
        req_id.0,
        ThemeItem::from(ThemeContext::from(preset)),
    )))
}

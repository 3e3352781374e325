use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::Value;

use crate::AppState;
use crate::services::dictionary::get_dictionary;
use crate::utils::{ApiError, ApiResult};

/// Get the UI translation bundle for a locale
#[utoipa::path(
    get,
    path = "/api/dictionaries/{locale}",
    responses(
        (status = 200, description = "Key/value bundle for the locale"),
        (status = 404, description = "No bundle for this locale"),
    ),
    tag = "Dictionaries"
)]
pub async fn get_dictionary_bundle(
    State(state): State<Arc<AppState>>,
    Path(locale): Path<String>,
) -> ApiResult<Json<Value>> {
    if !state.registry.is_valid(&locale) {
        return Err(ApiError::DictionaryNotFound { locale });
    }
    let bundle = get_dictionary(&locale)
        .ok_or_else(|| ApiError::DictionaryNotFound { locale: locale.clone() })?;
    tracing::debug!("Serving dictionary bundle for '{}'", locale);
    Ok(Json(bundle.clone()))
}

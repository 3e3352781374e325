use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;

use crate::AppState;
use crate::middleware::RequestLocale;

/// Health probe payload.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: &'static str,
    pub version: &'static str,
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Server is up", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Serve the web-app shell for locale-prefixed page routes.
///
/// The locale router guarantees every request landing here carries a valid
/// locale prefix; the shell bootstraps client-side and fetches its content
/// and dictionary from the API.
pub async fn serve_app_shell(
    State(state): State<Arc<AppState>>,
    Extension(RequestLocale(locale)): Extension<RequestLocale>,
) -> Response {
    let shell_path = format!("{}/index.html", state.config.static_config.web_root);
    match tokio::fs::read_to_string(&shell_path).await {
        Ok(shell) => {
            tracing::debug!("Serving app shell for locale '{}'", locale);
            Html(shell).into_response()
        },
        Err(e) => {
            tracing::warn!("App shell {} unreadable: {}", shell_path, e);
            StatusCode::NOT_FOUND.into_response()
        },
    }
}

/// Fallback for excluded paths that match nothing (dotted paths outside the
/// asset mounts, unknown API routes are handled by their own router).
pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

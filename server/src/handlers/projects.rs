use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};

use crate::AppState;
use crate::models::Project;
use crate::utils::{ApiError, ApiResult, is_valid_slug};

/// List published interior-design projects, newest first
#[utoipa::path(
    get,
    path = "/api/projects",
    responses(
        (status = 200, description = "Published projects", body = Vec<Project>)
    ),
    tag = "Projects"
)]
pub async fn list_projects(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Project>>> {
    let projects = state.content.projects().await?;
    tracing::debug!("Retrieved {} projects", projects.len());
    Ok(Json(projects))
}

/// Get a single project
#[utoipa::path(
    get,
    path = "/api/projects/{slug}",
    responses(
        (status = 200, description = "Project detail", body = Project),
        (status = 400, description = "Malformed slug"),
        (status = 404, description = "Project not found"),
    ),
    tag = "Projects"
)]
pub async fn get_project(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> ApiResult<Json<Project>> {
    if !is_valid_slug(&slug) {
        return Err(ApiError::invalid_input(format!("malformed slug: {}", slug)));
    }
    tracing::debug!("Fetching project slug={}", slug);
    let project = state
        .content
        .project_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::project_not_found(&slug))?;
    Ok(Json(project))
}

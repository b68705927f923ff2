use axum::extract::{Path, State};
use axum::http::HeaderMap;

use crate::auth::Role;
use crate::database::models::Project;
use crate::middleware::{session_from_headers, ApiResponse, ApiResult};
use crate::services::projects::ProjectService;
use crate::AppState;

/// GET /api/projects - published projects, newest first
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Project>> {
    let projects = ProjectService::new(&state.db).list(true).await?;
    Ok(ApiResponse::success(projects))
}

/// GET /api/projects/:slug - detail by slug; drafts 404 unless admin
pub async fn get(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Project> {
    let session = session_from_headers(&headers);
    let include_drafts = session.is_some_and(|u| u.role == Role::Admin);

    let project = ProjectService::new(&state.db)
        .get_by_slug(&slug, include_drafts)
        .await?;
    Ok(ApiResponse::success(project))
}

//! Admin CRUD over projects; parallel to the posts handlers.

use axum::extract::{Json, Path, State};
use serde_json::{json, Value};

use crate::database::models::Project;
use crate::handlers::parse_id;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::projects::{NewProject, ProjectPatch, ProjectService};
use crate::AppState;

/// GET /api/admin/projects
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Project>> {
    let projects = ProjectService::new(&state.db).list(false).await?;
    Ok(ApiResponse::success(projects))
}

/// POST /api/admin/projects
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NewProject>,
) -> ApiResult<Project> {
    let project = ProjectService::new(&state.db).create(input).await?;
    Ok(ApiResponse::created(project))
}

/// GET /api/admin/projects/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Project> {
    let id = parse_id(&id)?;
    let project = ProjectService::new(&state.db).get_by_id(id).await?;
    Ok(ApiResponse::success(project))
}

/// PATCH /api/admin/projects/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ProjectPatch>,
) -> ApiResult<Project> {
    let id = parse_id(&id)?;
    let project = ProjectService::new(&state.db).update(id, patch).await?;
    Ok(ApiResponse::success(project))
}

/// DELETE /api/admin/projects/:id
pub async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Value> {
    let id = parse_id(&id)?;
    ProjectService::new(&state.db).delete(id).await?;
    Ok(ApiResponse::success(json!({ "ok": true })))
}

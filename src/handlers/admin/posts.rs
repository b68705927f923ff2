//! Admin CRUD over posts. The session guard runs as a route layer on the
//! whole /api/admin subtree, so every handler here sees an ADMIN session.

use axum::extract::{Json, Path, State};
use serde_json::{json, Value};

use crate::database::models::Post;
use crate::handlers::parse_id;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::posts::{NewPost, PostPatch, PostService};
use crate::AppState;

/// GET /api/admin/posts - all posts, drafts included
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Post>> {
    let posts = PostService::new(&state.db).list(false).await?;
    Ok(ApiResponse::success(posts))
}

/// POST /api/admin/posts
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NewPost>,
) -> ApiResult<Post> {
    let post = PostService::new(&state.db).create(input).await?;
    Ok(ApiResponse::created(post))
}

/// GET /api/admin/posts/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Post> {
    let id = parse_id(&id)?;
    let post = PostService::new(&state.db).get_by_id(id).await?;
    Ok(ApiResponse::success(post))
}

/// PATCH /api/admin/posts/:id - partial update, only supplied fields change
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<PostPatch>,
) -> ApiResult<Post> {
    let id = parse_id(&id)?;
    let post = PostService::new(&state.db).update(id, patch).await?;
    Ok(ApiResponse::success(post))
}

/// DELETE /api/admin/posts/:id - permanent, no tombstone
pub async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Value> {
    let id = parse_id(&id)?;
    PostService::new(&state.db).delete(id).await?;
    Ok(ApiResponse::success(json!({ "ok": true })))
}

//! Public read surface for posts. No guard: the visibility filter is the
//! access control here. An admin token on the detail route reveals drafts.

use axum::extract::{Path, State};
use axum::http::HeaderMap;

use crate::auth::Role;
use crate::database::models::Post;
use crate::middleware::{session_from_headers, ApiResponse, ApiResult};
use crate::services::posts::PostService;
use crate::AppState;

/// GET /api/posts - published posts, newest first
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Post>> {
    let posts = PostService::new(&state.db).list(true).await?;
    Ok(ApiResponse::success(posts))
}

/// GET /api/posts/:slug - detail by slug; drafts 404 unless admin
pub async fn get(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Post> {
    let session = session_from_headers(&headers);
    let include_drafts = session.is_some_and(|u| u.role == Role::Admin);

    let post = PostService::new(&state.db)
        .get_by_slug(&slug, include_drafts)
        .await?;
    Ok(ApiResponse::success(post))
}

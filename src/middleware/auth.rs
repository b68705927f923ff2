use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{self, authorize_admin, AuthUser};
use crate::error::ApiError;

/// Resolve the current session from the Authorization header, if any.
///
/// A missing header, a non-Bearer scheme, or a token that fails validation
/// all resolve to "no session".
pub fn session_from_headers(headers: &HeaderMap) -> Option<AuthUser> {
    let token = bearer_token(headers)?;
    auth::validate_token(token).map(AuthUser::from)
}

/// Session guard for the admin subtree: rejects requests without a valid
/// ADMIN session and injects the resolved identity for downstream handlers.
pub async fn admin_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session = session_from_headers(&headers);
    let user = authorize_admin(session.as_ref())?.clone();

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get("authorization")?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

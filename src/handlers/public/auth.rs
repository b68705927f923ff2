use axum::extract::{Json, State};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth;
use crate::config;
use crate::database::models::User;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /auth/login - verify credentials and issue a session token.
///
/// Failures never reveal whether the email or the password was wrong.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Value> {
    let email = req.email.trim().to_lowercase();
    if email.is_empty() || req.password.is_empty() {
        return Err(ApiError::missing_fields("email and password are required"));
    }

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| ApiError::unauthorized("invalid credentials"))?;

    if !auth::verify_password(&req.password, &user.password)? {
        return Err(ApiError::unauthorized("invalid credentials"));
    }

    let token = auth::generate_token(user.id, &user.email, user.role)?;
    let expires_in = config::config().security.jwt_expiry_hours * 3600;

    tracing::info!(user = %user.email, "login succeeded");

    Ok(ApiResponse::success(json!({
        "token": token,
        "user": {
            "id": user.id,
            "email": user.email,
            "name": user.name,
            "role": user.role,
        },
        "expires_in": expires_in,
    })))
}

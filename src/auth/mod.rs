use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config;
use crate::error::ApiError;

/// User role as stored in Postgres and embedded in session tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    User,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, email: String, role: Role, expiry_hours: u64) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            email,
            role,
            iat: now.timestamp(),
            exp: (now + Duration::hours(expiry_hours as i64)).timestamp(),
        }
    }
}

/// Resolved session identity, passed explicitly through guard and handlers.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token generation failed: {0}")]
    TokenGeneration(String),
    #[error("session secret is not configured")]
    MissingSecret,
    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// Authorization policy for the admin area: no session is unauthenticated,
/// a session without the ADMIN role is forbidden. Both map to 403.
pub fn authorize_admin(session: Option<&AuthUser>) -> Result<&AuthUser, ApiError> {
    match session {
        None => Err(ApiError::unauthenticated("authentication required")),
        Some(user) if user.role != Role::Admin => {
            Err(ApiError::forbidden("admin access required"))
        }
        Some(user) => Ok(user),
    }
}

/// Issue a signed session token for an authenticated user.
pub fn generate_token(user_id: Uuid, email: &str, role: Role) -> Result<String, AuthError> {
    let security = &config::config().security;
    let claims = Claims::new(user_id, email.to_string(), role, security.jwt_expiry_hours);
    encode_token(&claims, &security.jwt_secret)
}

/// Validate a session token against the configured secret.
pub fn validate_token(token: &str) -> Option<Claims> {
    let secret = &config::config().security.jwt_secret;
    if secret.is_empty() {
        return None;
    }
    decode_token(token, secret)
}

fn encode_token(claims: &Claims, secret: &str) -> Result<String, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::TokenGeneration(e.to_string()))
}

fn decode_token(token: &str, secret: &str) -> Option<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .ok()
}

/// One-way salted hash for credential storage.
pub fn hash_password(plaintext: &str) -> Result<String, AuthError> {
    bcrypt::hash(plaintext, bcrypt::DEFAULT_COST).map_err(|e| AuthError::Hash(e.to_string()))
}

/// Verify a plaintext password against a stored hash.
pub fn verify_password(plaintext: &str, hash: &str) -> Result<bool, AuthError> {
    bcrypt::verify(plaintext, hash).map_err(|e| AuthError::Hash(e.to_string()))
}

pub mod admin;
pub mod public;

use uuid::Uuid;

use crate::error::ApiError;

/// Parse a path id before any storage access; a malformed id is a 400, not
/// a 404.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_id(format!("'{raw}' is not a valid id")))
}

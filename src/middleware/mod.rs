pub mod auth;
pub mod response;

pub use auth::{admin_auth_middleware, session_from_headers};
pub use response::{ApiResponse, ApiResult};

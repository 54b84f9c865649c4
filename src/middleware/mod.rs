pub mod auth;
pub mod json;

pub use auth::{auth_middleware, require_role, AppState, AuthUser};
pub use json::ApiJson;

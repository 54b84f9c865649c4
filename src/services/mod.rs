pub mod auth_service;
pub mod file_service;
pub mod support_service;

pub use auth_service::AuthService;
pub use file_service::FileService;
pub use support_service::{ScriptedResponder, SupportResponder};

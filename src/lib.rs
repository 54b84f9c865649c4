pub mod api;
pub mod cards;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod navigation;
pub mod openapi;
pub mod services;
pub mod session;
pub mod store;
pub mod utils;

pub use api::app;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use middleware::AppState;
pub use openapi::ApiDoc;

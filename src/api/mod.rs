pub mod auth;
pub mod bills;
pub mod complaints;
pub mod files;
pub mod landlord;
pub mod support;
pub mod tenant;
pub mod users;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    middleware as axum_middleware,
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::middleware::{auth_middleware, AppState};
use crate::openapi::ApiDoc;
use crate::services::file_service::MAX_RECEIPT_SIZE;

/// Largest accepted request body: one receipt plus multipart framing.
pub const MAX_BODY_SIZE: usize = MAX_RECEIPT_SIZE + 64 * 1024;

pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::routes())
        .route("/session", get(auth::get_session))
        .nest("/tenant", tenant::routes())
        .nest("/landlord", landlord::routes())
        .nest("/files", files::routes())
}

/// The full application: API, docs and the shared middleware stack.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/v1", routes())
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "name": "Lokaly API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Backend API for Lokaly - property rentals for tenants and landlords"
    }))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

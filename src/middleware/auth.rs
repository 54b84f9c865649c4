use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{request::Parts, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use chrono::Duration;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::UserRole;
use crate::navigation;
use crate::services::{AuthService, ScriptedResponder, SupportResponder};
use crate::session::{SessionStore, SessionUser};
use crate::store::Store;

#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: UserRole,
    pub session_id: Uuid,
    pub user: SessionUser,
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub sessions: Arc<SessionStore>,
    pub config: Config,
    pub support: Arc<dyn SupportResponder>,
}

impl AppState {
    pub fn new(store: Store, config: Config) -> Self {
        Self {
            store: Arc::new(store),
            sessions: Arc::new(SessionStore::new(Duration::seconds(
                config.jwt_access_expiry,
            ))),
            config,
            support: Arc::new(ScriptedResponder::default()),
        }
    }

    pub fn with_responder(mut self, support: Arc<dyn SupportResponder>) -> Self {
        self.support = support;
        self
    }
}

/// Exposes `AppState` to extractors through request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(state);
    next.run(request).await
}

/// Route-boundary guard for one role's screen tree.
pub async fn require_role(
    State(required): State<UserRole>,
    auth_user: AuthUser,
    request: Request<Body>,
    next: Next,
) -> AppResult<Response> {
    if let Err(err) = navigation::authorize(auth_user.role, required) {
        tracing::warn!(
            user_id = %auth_user.user_id,
            role = auth_user.role.as_str(),
            required = required.as_str(),
            path = %request.uri().path(),
            "Cross-role access rejected"
        );
        return Err(err);
    }

    Ok(next.run(request).await)
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = parts
            .extensions
            .get::<AppState>()
            .cloned()
            .ok_or_else(|| AppError::Internal("AppState missing from extensions".to_string()))?;

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::Unauthorized)?;

        let auth_service = AuthService::new(app_state.config.clone());
        let claims = auth_service.verify_token(bearer.token())?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::Unauthorized)?;
        let session_id = Uuid::parse_str(&claims.sid).map_err(|_| AppError::Unauthorized)?;

        // A logged-out session rejects its tokens even before they expire.
        let user = app_state
            .sessions
            .current(session_id)
            .await
            .ok_or(AppError::Unauthorized)?;

        if user.id != user_id || user.role.as_str() != claims.role {
            return Err(AppError::Unauthorized);
        }

        Ok(AuthUser {
            user_id,
            role: user.role,
            session_id,
            user,
        })
    }
}

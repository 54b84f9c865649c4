use axum::{extract::State, routing::post, Json, Router};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::{ApiJson, AppState, AuthUser};
use crate::models::{LoginRequest, LoginResponse, SessionResponse, UserPublic};
use crate::navigation::{home_for, screen_list};
use crate::services::{auth_service::normalize_email, AuthService};
use crate::session::SessionUser;

#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
}

/// Sign in as tenant or landlord
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Sessão aberta", body = LoginResponse),
        (status = 401, description = "Credenciais inválidas"),
        (status = 422, description = "Dados inválidos")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    payload.validate()?;

    let email = normalize_email(&payload.email);
    let user = state
        .store
        .read()
        .await
        .user_by_email(&email)
        .cloned()
        .ok_or(AppError::InvalidCredentials)?;

    if !AuthService::verify_password(&payload.password, &user.password_hash)? {
        return Err(AppError::InvalidCredentials);
    }

    // The account's role decides the screen tree, so a mismatched pick is refused.
    if user.role != payload.role {
        tracing::warn!(
            user_id = %user.id,
            role = user.role.as_str(),
            requested = payload.role.as_str(),
            "Login with mismatched role"
        );
        return Err(AppError::InvalidCredentials);
    }

    let session_user = SessionUser::from(&user);
    let session_id = state.sessions.open(session_user.clone()).await;
    let access_token = AuthService::new(state.config.clone())
        .generate_access_token(&session_user, session_id)?;

    let active_sessions = state.sessions.active_count().await;
    tracing::info!(
        user_id = %user.id,
        role = user.role.as_str(),
        active_sessions,
        "User logged in"
    );

    Ok(Json(LoginResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: state.config.jwt_access_expiry,
        user: UserPublic::from(&user),
        home: home_for(user.role),
        screens: screen_list(user.role),
    }))
}

/// Close the current session
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Sessão encerrada", body = LogoutResponse),
        (status = 401, description = "Não autenticado")
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<LogoutResponse>> {
    state.sessions.close(auth_user.session_id).await;

    let active_sessions = state.sessions.active_count().await;
    tracing::info!(
        user_id = %auth_user.user_id,
        active_sessions,
        "User logged out"
    );

    Ok(Json(LogoutResponse {
        success: true,
        message: "Sessão encerrada".to_string(),
    }))
}

/// Current session and the screens it may reach
#[utoipa::path(
    get,
    path = "/api/v1/session",
    tag = "auth",
    responses(
        (status = 200, description = "Estado da sessão", body = SessionResponse)
    )
)]
pub async fn get_session(
    State(state): State<AppState>,
    auth_user: Option<AuthUser>,
) -> AppResult<Json<SessionResponse>> {
    let Some(auth_user) = auth_user else {
        return Ok(Json(SessionResponse {
            is_authenticated: false,
            user: None,
            home: None,
            screens: Vec::new(),
        }));
    };

    let user = state
        .store
        .read()
        .await
        .user(auth_user.user_id)
        .map(UserPublic::from)
        .ok_or(AppError::Unauthorized)?;

    Ok(Json(SessionResponse {
        is_authenticated: true,
        user: Some(user),
        home: Some(home_for(auth_user.role)),
        screens: screen_list(auth_user.role),
    }))
}

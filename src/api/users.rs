use axum::{
    extract::{Multipart, State},
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::{ApiJson, AppState, AuthUser};
use crate::models::{
    AvatarUploadResponse, NotificationSettingsRequest, UpdateProfileRequest, User, UserPublic,
};
use crate::services::{
    auth_service::normalize_email,
    file_service::{read_multipart_file, validate_image_content_type, MAX_IMAGE_SIZE},
    FileService,
};
use crate::session::SessionUser;
use crate::store::StoreData;
use crate::utils::validators::sanitize_string;

/// Mounted under each role's `/profile`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_profile).put(update_profile))
        .route("/avatar", post(upload_avatar))
        .route("/notifications", put(update_notifications))
}

fn user_not_found() -> AppError {
    AppError::NotFound("Usuário não encontrado".to_string())
}

/// Applies `change` to the caller's account under the store lock and republishes it
/// to the session. Nothing is written when `change` fails.
async fn update_user<F>(state: &AppState, auth_user: &AuthUser, change: F) -> AppResult<UserPublic>
where
    F: FnOnce(&StoreData, &mut User) -> AppResult<()>,
{
    let user = {
        let mut data = state.store.write().await;
        let mut user = data.user(auth_user.user_id).cloned().ok_or_else(user_not_found)?;
        change(&data, &mut user)?;
        user.updated_at = Utc::now();

        let stored = data.user_mut(auth_user.user_id).ok_or_else(user_not_found)?;
        *stored = user.clone();
        user
    };

    state.sessions.refresh_user(SessionUser::from(&user)).await;
    Ok(UserPublic::from(&user))
}

/// Profile of the signed-in user
#[utoipa::path(
    get,
    path = "/api/v1/{role}/profile",
    tag = "profile",
    security(("bearer_auth" = [])),
    params(("role" = String, Path, description = "`tenant` or `landlord`")),
    responses(
        (status = 200, description = "Perfil do usuário", body = UserPublic),
        (status = 401, description = "Não autenticado")
    )
)]
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<UserPublic>> {
    let data = state.store.read().await;
    let user = data.user(auth_user.user_id).ok_or_else(user_not_found)?;
    Ok(Json(UserPublic::from(user)))
}

#[utoipa::path(
    put,
    path = "/api/v1/{role}/profile",
    tag = "profile",
    security(("bearer_auth" = [])),
    params(("role" = String, Path, description = "`tenant` or `landlord`")),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Perfil atualizado", body = UserPublic),
        (status = 409, description = "Email já cadastrado"),
        (status = 422, description = "Dados inválidos")
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ApiJson(payload): ApiJson<UpdateProfileRequest>,
) -> AppResult<Json<UserPublic>> {
    payload.validate()?;

    let email = payload.email.as_deref().map(normalize_email);

    let user = update_user(&state, &auth_user, |data, user| {
        if let Some(email) = email {
            if data
                .user_by_email(&email)
                .is_some_and(|other| other.id != user.id)
            {
                return Err(AppError::Conflict("Email já cadastrado".to_string()));
            }
            user.email = email;
        }
        if let Some(name) = &payload.name {
            user.name = sanitize_string(name);
        }
        if let Some(phone) = &payload.phone {
            user.phone = Some(phone.trim().to_string());
        }
        Ok(())
    })
    .await?;

    tracing::info!(user_id = %auth_user.user_id, "Profile updated");

    Ok(Json(user))
}

#[utoipa::path(
    post,
    path = "/api/v1/{role}/profile/avatar",
    tag = "profile",
    security(("bearer_auth" = [])),
    params(("role" = String, Path, description = "`tenant` or `landlord`")),
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Foto atualizada", body = AvatarUploadResponse),
        (status = 400, description = "Arquivo inválido")
    )
)]
pub async fn upload_avatar(
    State(state): State<AppState>,
    auth_user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Json<AvatarUploadResponse>> {
    let upload = read_multipart_file(
        &mut multipart,
        "avatar",
        validate_image_content_type,
        MAX_IMAGE_SIZE,
    )
    .await?;

    let file_service = FileService::new(state.store.clone(), &state.config);
    let stored = file_service
        .upload_file("avatars", auth_user.user_id, upload)
        .await?;

    let mut previous = None;
    let avatar_url = stored.url.clone();
    let updated = update_user(&state, &auth_user, |_, user| {
        previous = user.profile_image.replace(avatar_url);
        Ok(())
    })
    .await;

    if let Err(err) = updated {
        file_service.remove_by_url(&stored.url).await;
        return Err(err);
    }
    if let Some(url) = previous {
        file_service.remove_by_url(&url).await;
    }

    Ok(Json(AvatarUploadResponse {
        success: true,
        avatar_url: stored.url,
    }))
}

#[utoipa::path(
    put,
    path = "/api/v1/{role}/profile/notifications",
    tag = "profile",
    security(("bearer_auth" = [])),
    params(("role" = String, Path, description = "`tenant` or `landlord`")),
    request_body = NotificationSettingsRequest,
    responses(
        (status = 200, description = "Preferência salva", body = UserPublic)
    )
)]
pub async fn update_notifications(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ApiJson(payload): ApiJson<NotificationSettingsRequest>,
) -> AppResult<Json<UserPublic>> {
    let user = update_user(&state, &auth_user, |_, user| {
        user.notifications_enabled = payload.enabled;
        Ok(())
    })
    .await?;

    Ok(Json(user))
}

use axum::{extract::State, Json};
use chrono::Utc;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::{ApiJson, AppState, AuthUser};
use crate::models::{
    MessageSender, SendSupportMessageRequest, SendSupportMessageResponse, SupportMessage,
    SupportThreadResponse,
};
use crate::services::support_service::{greeting, user_turns};
use crate::utils::validators::is_blank;

/// Support chat thread, opened with the greeting on first access
#[utoipa::path(
    get,
    path = "/api/v1/tenant/support/messages",
    tag = "support",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Mensagens do suporte", body = SupportThreadResponse),
        (status = 403, description = "Acesso negado")
    )
)]
pub async fn get_messages(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<SupportThreadResponse>> {
    let mut data = state.store.write().await;
    let thread = data
        .support_threads
        .entry(auth_user.user_id)
        .or_insert_with(|| vec![greeting(Utc::now())]);

    Ok(Json(SupportThreadResponse {
        messages: thread.clone(),
    }))
}

/// Send a message; the scripted agent answers right away
#[utoipa::path(
    post,
    path = "/api/v1/tenant/support/messages",
    tag = "support",
    security(("bearer_auth" = [])),
    request_body = SendSupportMessageRequest,
    responses(
        (status = 200, description = "Mensagem enviada", body = SendSupportMessageResponse),
        (status = 422, description = "Mensagem em branco ou longa demais")
    )
)]
pub async fn send_message(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ApiJson(payload): ApiJson<SendSupportMessageRequest>,
) -> AppResult<Json<SendSupportMessageResponse>> {
    if is_blank(&payload.text) {
        return Err(AppError::Validation("Mensagem vazia".to_string()));
    }
    payload.validate()?;

    let now = Utc::now();
    let mut data = state.store.write().await;
    let thread = data
        .support_threads
        .entry(auth_user.user_id)
        .or_insert_with(|| vec![greeting(now)]);

    let turn = user_turns(thread);
    let text = payload.text.trim().to_string();
    let reply_text = state.support.reply(&text, turn);

    let sent = SupportMessage::new(text, MessageSender::User, now);
    let reply = SupportMessage::new(reply_text, MessageSender::Support, now);
    thread.push(sent.clone());
    thread.push(reply.clone());

    tracing::debug!(user_id = %auth_user.user_id, turn, "Support message answered");

    Ok(Json(SendSupportMessageResponse { sent, reply }))
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MessageSender {
    User,
    Support,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SupportMessage {
    pub id: Uuid,
    pub text: String,
    pub sender: MessageSender,
    /// HH:MM
    pub timestamp: String,
    pub created_at: DateTime<Utc>,
}

impl SupportMessage {
    pub fn new(text: impl Into<String>, sender: MessageSender, at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender,
            timestamp: at.format("%H:%M").to_string(),
            created_at: at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SendSupportMessageRequest {
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SupportThreadResponse {
    pub messages: Vec<SupportMessage>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SendSupportMessageResponse {
    pub sent: SupportMessage,
    pub reply: SupportMessage,
}

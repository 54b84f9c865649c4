use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::cards::ComplaintCard;
use crate::error::{AppError, AppResult};
use crate::models::filter::{FilterChip, HasStatus};
use crate::models::status::{ComplaintStatus, StatusBadge, StatusDisplay};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Complaint {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub property_id: Uuid,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub status: ComplaintStatus,
    pub image_url: Option<String>,
    pub responses: Vec<ComplaintReply>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ComplaintReply {
    pub id: Uuid,
    pub message: String,
    pub date: NaiveDate,
    pub is_landlord: bool,
}

impl HasStatus for Complaint {
    type Status = ComplaintStatus;

    fn status(&self) -> ComplaintStatus {
        self.status
    }
}

impl Complaint {
    pub fn advance_to(&mut self, target: ComplaintStatus) -> AppResult<()> {
        if !self.status.can_advance_to(target) {
            return Err(AppError::Conflict(format!(
                "Transição inválida: {} -> {}",
                self.status.as_str(),
                target.as_str()
            )));
        }

        self.status = target;
        Ok(())
    }

    /// Appends a reply. The first landlord reply on a new complaint starts processing.
    pub fn add_reply(
        &mut self,
        message: String,
        date: NaiveDate,
        is_landlord: bool,
    ) -> AppResult<&ComplaintReply> {
        if self.status == ComplaintStatus::Resolved {
            return Err(AppError::Conflict("Chamado já resolvido".to_string()));
        }

        if is_landlord && self.status == ComplaintStatus::New {
            self.status = ComplaintStatus::Processing;
        }

        self.responses.push(ComplaintReply {
            id: Uuid::new_v4(),
            message,
            date,
            is_landlord,
        });

        self.responses
            .last()
            .ok_or_else(|| AppError::Internal("reply not stored".to_string()))
    }

    pub fn latest_activity(&self) -> NaiveDate {
        self.responses
            .iter()
            .map(|reply| reply.date)
            .max()
            .map_or(self.date, |last| last.max(self.date))
    }
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct ComplaintsQuery {
    /// `all`, `new`, `processing` or `resolved`
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateComplaintRequest {
    #[serde(default)]
    #[validate(length(max = 120))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: String,
    #[validate(length(max = 512))]
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddReplyRequest {
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub message: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateComplaintStatusRequest {
    pub status: ComplaintStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ComplaintListResponse {
    pub filter: String,
    pub filters: Vec<FilterChip>,
    pub complaints: Vec<ComplaintCard>,
    pub empty_message: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ComplaintDetailResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub date: String,
    pub status: ComplaintStatus,
    pub badge: StatusBadge,
    pub image_url: Option<String>,
    pub property_name: Option<String>,
    pub tenant_name: Option<String>,
    pub responses: Vec<ComplaintReplyView>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ComplaintReplyView {
    pub id: Uuid,
    pub message: String,
    pub date: String,
    pub is_landlord: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateComplaintResponse {
    pub success: bool,
    pub message: String,
    pub complaint: ComplaintCard,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImageUploadResponse {
    pub success: bool,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complaint(status: ComplaintStatus) -> Complaint {
        Complaint {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            property_id: Uuid::new_v4(),
            title: "Interruptor da cozinha não funciona".to_string(),
            description: "O interruptor da luz da cozinha parou de funcionar.".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            status,
            image_url: None,
            responses: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_landlord_reply_starts_processing() {
        let mut complaint = complaint(ComplaintStatus::New);
        let date = NaiveDate::from_ymd_opt(2025, 8, 2).unwrap();

        let reply = complaint
            .add_reply("Vamos enviar um eletricista.".to_string(), date, true)
            .unwrap();
        assert!(reply.is_landlord);

        assert_eq!(complaint.status, ComplaintStatus::Processing);
        assert_eq!(complaint.responses.len(), 1);
        assert_eq!(complaint.latest_activity(), date);
    }

    #[test]
    fn test_tenant_reply_keeps_status() {
        let mut complaint = complaint(ComplaintStatus::New);
        complaint
            .add_reply(
                "Ainda sem luz.".to_string(),
                NaiveDate::from_ymd_opt(2025, 8, 2).unwrap(),
                false,
            )
            .unwrap();
        assert_eq!(complaint.status, ComplaintStatus::New);
    }

    #[test]
    fn test_resolved_complaint_rejects_replies() {
        let mut complaint = complaint(ComplaintStatus::Resolved);
        let result = complaint.add_reply(
            "Olá".to_string(),
            NaiveDate::from_ymd_opt(2025, 8, 2).unwrap(),
            true,
        );
        assert!(result.is_err());
        assert!(complaint.responses.is_empty());
    }

    #[test]
    fn test_status_never_moves_backwards() {
        let mut complaint = complaint(ComplaintStatus::Processing);
        assert!(complaint.advance_to(ComplaintStatus::New).is_err());
        assert_eq!(complaint.status, ComplaintStatus::Processing);

        complaint.advance_to(ComplaintStatus::Resolved).unwrap();
        assert_eq!(complaint.status, ComplaintStatus::Resolved);
        assert!(complaint.advance_to(ComplaintStatus::Processing).is_err());
    }
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{CardAction, API_PREFIX};
use crate::models::{Complaint, ComplaintStatus, StatusBadge, StatusDisplay};
use crate::utils::format::format_date;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ComplaintCard {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub date: String,
    pub status: ComplaintStatus,
    pub badge: StatusBadge,
    pub responses_count: usize,
    pub responses_label: String,
    pub property_name: Option<String>,
    pub tenant_name: Option<String>,
    pub actions: Vec<CardAction>,
}

impl ComplaintCard {
    fn base(complaint: &Complaint) -> Self {
        let count = complaint.responses.len();

        Self {
            id: complaint.id,
            title: complaint.title.clone(),
            description: complaint.description.clone(),
            image_url: complaint.image_url.clone(),
            date: format_date(complaint.date),
            status: complaint.status,
            badge: complaint.status.badge(),
            responses_count: count,
            responses_label: format!("{} respostas", count),
            property_name: None,
            tenant_name: None,
            actions: Vec::new(),
        }
    }

    pub fn for_tenant(complaint: &Complaint) -> Self {
        let mut card = Self::base(complaint);
        card.actions.push(CardAction::get(
            "view_details",
            "Ver Detalhes",
            format!("{}/tenant/complaints/{}", API_PREFIX, complaint.id),
        ));
        card
    }

    pub fn for_landlord(
        complaint: &Complaint,
        property_name: Option<String>,
        tenant_name: Option<String>,
    ) -> Self {
        let mut card = Self::base(complaint);
        let href = format!("{}/landlord/complaints/{}", API_PREFIX, complaint.id);

        card.property_name = property_name;
        card.tenant_name = tenant_name;
        card.actions
            .push(CardAction::get("view_details", "Ver Detalhes", href.clone()));
        if complaint.status.is_open() {
            card.actions.push(CardAction::post(
                "respond",
                "Responder",
                format!("{}/responses", href),
            ));
        }
        card
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ComplaintReply;
    use chrono::{NaiveDate, Utc};

    fn complaint(status: ComplaintStatus, replies: usize) -> Complaint {
        let date = NaiveDate::from_ymd_opt(2025, 7, 28).unwrap();
        Complaint {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            property_id: Uuid::new_v4(),
            title: "Vazamento na pia do banheiro".to_string(),
            description: "A pia do banheiro está com um vazamento.".to_string(),
            date,
            status,
            image_url: Some("https://images.pexels.com/photos/5728342/pexels-photo-5728342.jpeg".to_string()),
            responses: (0..replies)
                .map(|_| ComplaintReply {
                    id: Uuid::new_v4(),
                    message: "Iremos enviar um encanador.".to_string(),
                    date,
                    is_landlord: true,
                })
                .collect(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_tenant_card() {
        let card = ComplaintCard::for_tenant(&complaint(ComplaintStatus::Processing, 1));

        assert_eq!(card.date, "28/07/2025");
        assert_eq!(card.responses_label, "1 respostas");
        assert_eq!(card.badge.label, "Em Andamento");
        assert_eq!(card.actions.len(), 1);
        assert!(card.image_url.is_some());
    }

    #[test]
    fn test_landlord_card_can_respond_while_open() {
        let open = ComplaintCard::for_landlord(
            &complaint(ComplaintStatus::New, 0),
            Some("Residencial Flores, Nº 302".to_string()),
            Some("João Silva".to_string()),
        );
        assert_eq!(open.actions.last().unwrap().action, "respond");
        assert_eq!(open.responses_label, "0 respostas");

        let resolved = ComplaintCard::for_landlord(&complaint(ComplaintStatus::Resolved, 1), None, None);
        assert!(resolved.actions.iter().all(|a| a.action != "respond"));
    }
}

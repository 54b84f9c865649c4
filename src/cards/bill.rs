use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{CardAction, API_PREFIX};
use crate::models::{Bill, BillStatus, StatusBadge, StatusDisplay};
use crate::utils::format::{format_brl, format_date};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BillCard {
    pub id: Uuid,
    pub description: String,
    pub amount: Decimal,
    pub amount_display: String,
    pub due_date: String,
    /// Present only on paid bills.
    pub paid_date: Option<String>,
    pub status: BillStatus,
    pub badge: StatusBadge,
    pub tenant_name: Option<String>,
    pub actions: Vec<CardAction>,
}

impl BillCard {
    fn base(bill: &Bill) -> Self {
        let paid_date = match bill.status {
            BillStatus::Paid => bill.paid_date.map(format_date),
            _ => None,
        };

        Self {
            id: bill.id,
            description: bill.description.clone(),
            amount: bill.amount,
            amount_display: format_brl(bill.amount),
            due_date: format_date(bill.due_date),
            paid_date,
            status: bill.status,
            badge: bill.status.badge(),
            tenant_name: None,
            actions: Vec::new(),
        }
    }

    pub fn for_tenant(bill: &Bill) -> Self {
        let mut card = Self::base(bill);
        let href = format!("{}/tenant/bills/{}", API_PREFIX, bill.id);

        card.actions
            .push(CardAction::get("view_details", "Ver Detalhes", href.clone()));
        if bill.status.is_open() {
            card.actions.push(CardAction::post(
                "upload_receipt",
                "Anexar Comprovante",
                format!("{}/receipt", href),
            ));
        }
        card
    }

    pub fn for_landlord(bill: &Bill, tenant_name: Option<String>) -> Self {
        let mut card = Self::base(bill);
        card.tenant_name = tenant_name;
        card
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::cards::BillCard;
use crate::error::{AppError, AppResult};
use crate::models::filter::{FilterChip, HasStatus, StatusCount};
use crate::models::status::BillStatus;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Bill {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub property_id: Uuid,
    pub description: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub status: BillStatus,
    pub paid_date: Option<NaiveDate>,
    pub receipt: Option<Receipt>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Receipt {
    pub file_name: String,
    pub size: usize,
    pub content_type: String,
    pub url: String,
    pub uploaded_at: DateTime<Utc>,
}

impl HasStatus for Bill {
    type Status = BillStatus;

    fn status(&self) -> BillStatus {
        self.status
    }
}

impl Bill {
    /// Receipt upload settles a pending or overdue bill.
    pub fn attach_receipt(&mut self, receipt: Receipt, paid_on: NaiveDate) -> AppResult<()> {
        if !self.status.can_transition_to(BillStatus::Paid) {
            return Err(AppError::Conflict("Boleto já está pago".to_string()));
        }

        self.status = BillStatus::Paid;
        self.paid_date = Some(paid_on);
        self.receipt = Some(receipt);
        Ok(())
    }

    /// Marks a pending bill overdue once `today` is past its due date.
    pub fn refresh_overdue(&mut self, today: NaiveDate) -> bool {
        if self.status == BillStatus::Pending && self.due_date < today {
            self.status = BillStatus::Overdue;
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct BillsQuery {
    /// `all`, `pending`, `paid` or `overdue`
    pub status: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BillSummary {
    pub pending: usize,
    pub paid: usize,
    pub overdue: usize,
    pub total_open: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BillListResponse {
    pub filter: String,
    pub summary: BillSummary,
    pub counts: Vec<StatusCount>,
    pub filters: Vec<FilterChip>,
    pub bills: Vec<BillCard>,
    pub empty_message: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BillDetailResponse {
    pub bill: BillCard,
    pub property_name: Option<String>,
    pub receipt: Option<Receipt>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReceiptUploadResponse {
    pub success: bool,
    pub message: String,
    pub bill: BillCard,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct OverdueSweepRequest {
    pub as_of: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OverdueSweepResponse {
    pub success: bool,
    pub as_of: NaiveDate,
    pub updated: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bill(status: BillStatus) -> Bill {
        Bill {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            property_id: Uuid::new_v4(),
            description: "Aluguel de Agosto/2025".to_string(),
            amount: Decimal::new(185000, 2),
            due_date: NaiveDate::from_ymd_opt(2025, 8, 5).unwrap(),
            status,
            paid_date: None,
            receipt: None,
            created_at: Utc::now(),
        }
    }

    fn receipt() -> Receipt {
        Receipt {
            file_name: "comprovante.pdf".to_string(),
            size: 2048,
            content_type: "application/pdf".to_string(),
            url: "/api/v1/files/receipts/x.pdf".to_string(),
            uploaded_at: Utc::now(),
        }
    }

    #[test]
    fn test_receipt_settles_pending_bill() {
        let mut bill = bill(BillStatus::Pending);
        let today = NaiveDate::from_ymd_opt(2025, 8, 3).unwrap();

        bill.attach_receipt(receipt(), today).unwrap();

        assert_eq!(bill.status, BillStatus::Paid);
        assert_eq!(bill.paid_date, Some(today));
        assert!(bill.receipt.is_some());
    }

    #[test]
    fn test_receipt_settles_overdue_bill() {
        let mut bill = bill(BillStatus::Overdue);
        let today = NaiveDate::from_ymd_opt(2025, 8, 20).unwrap();
        assert!(bill.attach_receipt(receipt(), today).is_ok());
        assert_eq!(bill.status, BillStatus::Paid);
    }

    #[test]
    fn test_paid_bill_rejects_second_receipt() {
        let mut bill = bill(BillStatus::Paid);
        let result = bill.attach_receipt(receipt(), NaiveDate::from_ymd_opt(2025, 8, 3).unwrap());
        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert!(bill.receipt.is_none());
    }

    #[test]
    fn test_refresh_overdue_only_after_due_date() {
        let mut bill = bill(BillStatus::Pending);

        assert!(!bill.refresh_overdue(NaiveDate::from_ymd_opt(2025, 8, 5).unwrap()));
        assert_eq!(bill.status, BillStatus::Pending);

        assert!(bill.refresh_overdue(NaiveDate::from_ymd_opt(2025, 8, 6).unwrap()));
        assert_eq!(bill.status, BillStatus::Overdue);

        let mut paid = self::bill(BillStatus::Paid);
        assert!(!paid.refresh_overdue(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()));
        assert_eq!(paid.status, BillStatus::Paid);
    }
}

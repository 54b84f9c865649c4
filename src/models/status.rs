use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::models::theme;

/// Display mapping shared by every status kind.
///
/// Statuses are categorical tags here: this layer attaches color, label and
/// icon to each value and implies no ordering between them.
pub trait StatusDisplay: Copy + PartialEq + FromStr + 'static {
    /// Every value of the enumeration, in filter-bar order.
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;
    fn color(&self) -> &'static str;
    fn label(&self) -> &'static str;
    fn icon(&self) -> &'static str;
    /// Plural label used on filter chips and summaries.
    fn filter_label(&self) -> &'static str;

    fn badge(&self) -> StatusBadge {
        StatusBadge {
            status: self.as_str().to_string(),
            label: self.label().to_string(),
            color: self.color().to_string(),
            background: theme::tint(self.color()),
            icon: self.icon().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusBadge {
    pub status: String,
    pub label: String,
    pub color: String,
    pub background: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "status desconhecido: {}", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BillStatus {
    Pending,
    Paid,
    Overdue,
}

impl Default for BillStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl BillStatus {
    /// pending -> paid, pending -> overdue, overdue -> paid. Paid is terminal.
    pub fn can_transition_to(&self, next: BillStatus) -> bool {
        matches!(
            (self, next),
            (BillStatus::Pending, BillStatus::Paid)
                | (BillStatus::Pending, BillStatus::Overdue)
                | (BillStatus::Overdue, BillStatus::Paid)
        )
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, BillStatus::Paid)
    }
}

impl StatusDisplay for BillStatus {
    const ALL: &'static [Self] = &[BillStatus::Pending, BillStatus::Paid, BillStatus::Overdue];

    fn as_str(&self) -> &'static str {
        match self {
            BillStatus::Pending => "pending",
            BillStatus::Paid => "paid",
            BillStatus::Overdue => "overdue",
        }
    }

    fn color(&self) -> &'static str {
        match self {
            BillStatus::Paid => theme::SUCCESS,
            BillStatus::Overdue => theme::ERROR,
            BillStatus::Pending => theme::WARNING,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            BillStatus::Paid => "Pago",
            BillStatus::Overdue => "Atrasado",
            BillStatus::Pending => "Pendente",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            BillStatus::Paid => "check",
            BillStatus::Overdue => "alert-circle",
            BillStatus::Pending => "clock",
        }
    }

    fn filter_label(&self) -> &'static str {
        match self {
            BillStatus::Paid => "Pagos",
            BillStatus::Overdue => "Atrasados",
            BillStatus::Pending => "Pendentes",
        }
    }
}

impl FromStr for BillStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BillStatus::Pending),
            "paid" => Ok(BillStatus::Paid),
            "overdue" => Ok(BillStatus::Overdue),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    New,
    Processing,
    Resolved,
}

impl Default for ComplaintStatus {
    fn default() -> Self {
        Self::New
    }
}

impl ComplaintStatus {
    /// The only status a complaint may move to next, if any.
    pub fn next(&self) -> Option<ComplaintStatus> {
        match self {
            ComplaintStatus::New => Some(ComplaintStatus::Processing),
            ComplaintStatus::Processing => Some(ComplaintStatus::Resolved),
            ComplaintStatus::Resolved => None,
        }
    }

    pub fn can_advance_to(&self, target: ComplaintStatus) -> bool {
        self.next() == Some(target)
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, ComplaintStatus::Resolved)
    }
}

impl StatusDisplay for ComplaintStatus {
    const ALL: &'static [Self] = &[
        ComplaintStatus::New,
        ComplaintStatus::Processing,
        ComplaintStatus::Resolved,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::New => "new",
            ComplaintStatus::Processing => "processing",
            ComplaintStatus::Resolved => "resolved",
        }
    }

    fn color(&self) -> &'static str {
        match self {
            ComplaintStatus::Resolved => theme::SUCCESS,
            ComplaintStatus::Processing => theme::WARNING,
            ComplaintStatus::New => theme::ERROR,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ComplaintStatus::Resolved => "Resolvido",
            ComplaintStatus::Processing => "Em Andamento",
            ComplaintStatus::New => "Novo",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            ComplaintStatus::Resolved => "check-circle",
            ComplaintStatus::Processing => "clock",
            ComplaintStatus::New => "alert-circle",
        }
    }

    fn filter_label(&self) -> &'static str {
        match self {
            ComplaintStatus::Resolved => "Resolvidos",
            ComplaintStatus::Processing => "Em Andamento",
            ComplaintStatus::New => "Novos",
        }
    }
}

impl FromStr for ComplaintStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(ComplaintStatus::New),
            "processing" => Ok(ComplaintStatus::Processing),
            "resolved" => Ok(ComplaintStatus::Resolved),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_fully_mapped<S: StatusDisplay>() {
        for status in S::ALL {
            assert!(!status.as_str().is_empty());
            assert!(status.color().starts_with('#'));
            assert!(!status.label().is_empty());
            assert!(!status.icon().is_empty());
            assert!(!status.filter_label().is_empty());
        }
    }

    #[test]
    fn test_every_status_is_mapped() {
        assert_fully_mapped::<BillStatus>();
        assert_fully_mapped::<ComplaintStatus>();
    }

    #[test]
    fn test_bill_display_table() {
        assert_eq!(BillStatus::Pending.label(), "Pendente");
        assert_eq!(BillStatus::Pending.color(), "#FFA726");
        assert_eq!(BillStatus::Paid.icon(), "check");
        assert_eq!(BillStatus::Overdue.color(), "#EF5350");
    }

    #[test]
    fn test_complaint_display_table() {
        assert_eq!(ComplaintStatus::New.color(), "#EF5350");
        assert_eq!(ComplaintStatus::Processing.label(), "Em Andamento");
        assert_eq!(ComplaintStatus::Resolved.icon(), "check-circle");
    }

    #[test]
    fn test_badge_background_is_tinted_color() {
        let badge = ComplaintStatus::Resolved.badge();
        assert_eq!(badge.status, "resolved");
        assert_eq!(badge.background, "#66BB6A20");
    }

    #[test]
    fn test_status_names_round_trip_through_from_str() {
        for status in BillStatus::ALL {
            assert_eq!(status.as_str().parse::<BillStatus>(), Ok(*status));
        }
        for status in ComplaintStatus::ALL {
            assert_eq!(status.as_str().parse::<ComplaintStatus>(), Ok(*status));
        }
        assert!("all".parse::<BillStatus>().is_err());
        assert!("Paid".parse::<BillStatus>().is_err());
    }

    #[test]
    fn test_bill_transitions() {
        assert!(BillStatus::Pending.can_transition_to(BillStatus::Paid));
        assert!(BillStatus::Pending.can_transition_to(BillStatus::Overdue));
        assert!(BillStatus::Overdue.can_transition_to(BillStatus::Paid));
        assert!(!BillStatus::Paid.can_transition_to(BillStatus::Pending));
        assert!(!BillStatus::Paid.can_transition_to(BillStatus::Overdue));
        assert!(!BillStatus::Overdue.can_transition_to(BillStatus::Pending));
    }

    #[test]
    fn test_complaint_advances_one_step_at_a_time() {
        assert!(ComplaintStatus::New.can_advance_to(ComplaintStatus::Processing));
        assert!(ComplaintStatus::Processing.can_advance_to(ComplaintStatus::Resolved));
        assert!(!ComplaintStatus::New.can_advance_to(ComplaintStatus::Resolved));
        assert!(!ComplaintStatus::Resolved.can_advance_to(ComplaintStatus::New));
        assert!(!ComplaintStatus::Processing.can_advance_to(ComplaintStatus::Processing));
    }
}

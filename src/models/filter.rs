use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::models::status::StatusDisplay;

/// A record that carries one of the enumerated statuses.
pub trait HasStatus {
    type Status: StatusDisplay;

    fn status(&self) -> Self::Status;
}

/// Filter selection: every status value, or one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter<S> {
    All,
    Only(S),
}

impl<S> Default for StatusFilter<S> {
    fn default() -> Self {
        StatusFilter::All
    }
}

impl<S: StatusDisplay> StatusFilter<S> {
    /// Parses a `status` query value. Absent means `all`.
    pub fn parse(raw: Option<&str>) -> AppResult<Self> {
        match raw {
            None | Some("all") => Ok(StatusFilter::All),
            Some(value) => value
                .parse::<S>()
                .map(StatusFilter::Only)
                .map_err(|_| AppError::Validation(format!("Filtro inválido: {}", value))),
        }
    }

    pub fn matches(&self, status: S) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(selected) => *selected == status,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(status) => status.as_str(),
        }
    }
}

/// Items whose status matches `selection`, in input order. Never mutates the input.
pub fn filter_by_status<'a, T, I>(items: I, selection: &StatusFilter<T::Status>) -> Vec<&'a T>
where
    T: HasStatus + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .filter(|item| selection.matches(item.status()))
        .collect()
}

pub fn count_by_status<'a, T, I>(items: I, status: T::Status) -> usize
where
    T: HasStatus + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .filter(|item| item.status() == status)
        .count()
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FilterChip {
    pub value: String,
    pub label: String,
    pub count: usize,
    pub active: bool,
}

/// Filter bar: "Todos" followed by one chip per status, with counts over `items`.
pub fn filter_chips<'a, T, I>(items: I, active: &StatusFilter<T::Status>) -> Vec<FilterChip>
where
    T: HasStatus + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let items: Vec<&T> = items.into_iter().collect();

    let mut chips = vec![FilterChip {
        value: "all".to_string(),
        label: "Todos".to_string(),
        count: items.len(),
        active: *active == StatusFilter::All,
    }];

    for status in <T::Status as StatusDisplay>::ALL {
        chips.push(FilterChip {
            value: status.as_str().to_string(),
            label: status.filter_label().to_string(),
            count: count_by_status(items.iter().copied(), *status),
            active: *active == StatusFilter::Only(*status),
        });
    }

    chips
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatusCount {
    pub status: String,
    pub label: String,
    pub color: String,
    pub count: usize,
}

pub fn status_counts<'a, T, I>(items: I) -> Vec<StatusCount>
where
    T: HasStatus + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let items: Vec<&T> = items.into_iter().collect();

    <T::Status as StatusDisplay>::ALL
        .iter()
        .map(|status| StatusCount {
            status: status.as_str().to_string(),
            label: status.filter_label().to_string(),
            color: status.color().to_string(),
            count: count_by_status(items.iter().copied(), *status),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::status::{BillStatus, ComplaintStatus};

    #[derive(Debug, PartialEq)]
    struct Item {
        id: u32,
        status: BillStatus,
    }

    impl HasStatus for Item {
        type Status = BillStatus;

        fn status(&self) -> BillStatus {
            self.status
        }
    }

    fn sample() -> Vec<Item> {
        vec![
            Item { id: 1, status: BillStatus::Pending },
            Item { id: 2, status: BillStatus::Paid },
            Item { id: 3, status: BillStatus::Paid },
            Item { id: 4, status: BillStatus::Pending },
            Item { id: 5, status: BillStatus::Paid },
        ]
    }

    #[test]
    fn test_filter_paid_keeps_input_order() {
        let items = sample();
        let paid = filter_by_status(&items, &StatusFilter::Only(BillStatus::Paid));
        let ids: Vec<u32> = paid.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![2, 3, 5]);
    }

    #[test]
    fn test_filter_all_returns_everything() {
        let items = sample();
        let all = filter_by_status(&items, &StatusFilter::All);
        assert_eq!(all.len(), items.len());
        assert!(all.iter().zip(items.iter()).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn test_filter_without_matches_is_empty() {
        let items = sample();
        assert!(filter_by_status(&items, &StatusFilter::Only(BillStatus::Overdue)).is_empty());
    }

    #[test]
    fn test_filter_does_not_touch_input() {
        let items = sample();
        let _ = filter_by_status(&items, &StatusFilter::Only(BillStatus::Pending));
        assert_eq!(items, sample());
    }

    #[test]
    fn test_parse_selection() {
        assert_eq!(StatusFilter::<BillStatus>::parse(None).unwrap(), StatusFilter::All);
        assert_eq!(
            StatusFilter::<BillStatus>::parse(Some("all")).unwrap(),
            StatusFilter::All
        );
        assert_eq!(
            StatusFilter::<ComplaintStatus>::parse(Some("processing")).unwrap(),
            StatusFilter::Only(ComplaintStatus::Processing)
        );
        assert!(StatusFilter::<BillStatus>::parse(Some("processing")).is_err());
        assert!(StatusFilter::<BillStatus>::parse(Some("")).is_err());
    }

    #[test]
    fn test_chips_and_counts() {
        let items = sample();
        let chips = filter_chips(&items, &StatusFilter::Only(BillStatus::Paid));

        assert_eq!(chips.len(), 4);
        assert_eq!(chips[0].label, "Todos");
        assert_eq!(chips[0].count, 5);
        assert!(!chips[0].active);

        let paid = chips.iter().find(|chip| chip.value == "paid").unwrap();
        assert_eq!(paid.count, 3);
        assert!(paid.active);

        let counts = status_counts(&items);
        let pending = counts.iter().find(|c| c.status == "pending").unwrap();
        assert_eq!(pending.count, 2);
        assert_eq!(count_by_status(&items, BillStatus::Overdue), 0);
    }
}

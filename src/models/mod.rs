pub mod bill;
pub mod complaint;
pub mod filter;
pub mod property;
pub mod status;
pub mod support;
pub mod theme;
pub mod user;

pub use bill::*;
pub use complaint::*;
pub use filter::{
    count_by_status, filter_by_status, filter_chips, status_counts, FilterChip, HasStatus,
    StatusCount, StatusFilter,
};
pub use property::*;
pub use status::{BillStatus, ComplaintStatus, StatusBadge, StatusDisplay};
pub use support::*;
pub use user::*;

//! Card view models.
//!
//! A card is a pure function of one record and its status display. The
//! callbacks the client wires to buttons are described as [`CardAction`]s
//! pointing at the endpoints that perform them; cards never act on their own.

pub mod bill;
pub mod complaint;
pub mod property;

pub use bill::BillCard;
pub use complaint::ComplaintCard;
pub use property::PropertyCard;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const API_PREFIX: &str = "/api/v1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CardAction {
    pub action: String,
    pub label: String,
    pub method: String,
    pub href: String,
}

impl CardAction {
    pub fn get(action: &str, label: &str, href: String) -> Self {
        Self {
            action: action.to_string(),
            label: label.to_string(),
            method: "GET".to_string(),
            href,
        }
    }

    pub fn post(action: &str, label: &str, href: String) -> Self {
        Self {
            action: action.to_string(),
            label: label.to_string(),
            method: "POST".to_string(),
            href,
        }
    }
}

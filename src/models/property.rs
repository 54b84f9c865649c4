use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::cards::{BillCard, ComplaintCard, PropertyCard};
use crate::models::filter::StatusCount;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Property {
    pub id: Uuid,
    pub landlord_id: Uuid,
    pub tenant_id: Option<Uuid>,
    pub name: String,
    pub address: String,
    pub image_url: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    /// Square meters
    pub area: u32,
    pub rent: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TenantSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub property_name: Option<String>,
    pub open_bills: usize,
    pub open_complaints: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TenantDashboardResponse {
    pub welcome: String,
    pub property: Option<PropertyCard>,
    pub upcoming_bill: Option<BillCard>,
    pub recent_complaint: Option<ComplaintCard>,
    pub open_bills: usize,
    pub open_complaints: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LandlordDashboardResponse {
    pub welcome: String,
    pub properties: usize,
    pub tenants: usize,
    pub today: String,
    pub complaints: Vec<StatusCount>,
    pub bills: Vec<StatusCount>,
    pub recent_complaints: Vec<ComplaintCard>,
}

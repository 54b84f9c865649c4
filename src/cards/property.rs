use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Property;
use crate::utils::format::format_brl_compact;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PropertyCard {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub image_url: String,
    pub features: Vec<String>,
    pub rent: Decimal,
    pub rent_display: String,
    pub tenant_name: Option<String>,
}

impl PropertyCard {
    pub fn render(property: &Property) -> Self {
        Self {
            id: property.id,
            name: property.name.clone(),
            address: property.address.clone(),
            image_url: property.image_url.clone(),
            features: vec![
                format!("{} Quartos", property.bedrooms),
                format!("{} Banheiros", property.bathrooms),
                format!("{} m²", property.area),
            ],
            rent: property.rent,
            rent_display: format_brl_compact(property.rent),
            tenant_name: None,
        }
    }

    pub fn with_tenant(mut self, tenant_name: Option<String>) -> Self {
        self.tenant_name = tenant_name;
        self
    }
}

use axum::{
    extract::State,
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;

use super::{bills, complaints, users};
use crate::cards::{ComplaintCard, PropertyCard};
use crate::error::AppResult;
use crate::middleware::{require_role, AppState, AuthUser};
use crate::models::{
    count_by_status, status_counts, BillStatus, LandlordDashboardResponse, TenantSummary, UserRole,
};
use crate::utils::format::format_day_month;

const RECENT_COMPLAINTS: usize = 5;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/properties", get(list_properties))
        .route("/tenants", get(list_tenants))
        .route("/complaints", get(complaints::list_landlord_complaints))
        .route("/complaints/:id", get(complaints::get_landlord_complaint))
        .route("/complaints/:id/responses", post(complaints::add_reply))
        .route("/complaints/:id/status", put(complaints::update_complaint_status))
        .route("/bills", get(bills::list_landlord_bills))
        .route("/bills/overdue-sweep", post(bills::overdue_sweep))
        .nest("/profile", users::routes())
        .route_layer(from_fn_with_state(UserRole::Landlord, require_role))
}

/// Landlord home: portfolio size and status breakdowns
#[utoipa::path(
    get,
    path = "/api/v1/landlord/dashboard",
    tag = "landlord",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Início do locador", body = LandlordDashboardResponse),
        (status = 403, description = "Acesso negado")
    )
)]
pub async fn dashboard(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<LandlordDashboardResponse>> {
    let data = state.store.read().await;
    let landlord_id = auth_user.user_id;

    let complaints = data.complaints_of_landlord(landlord_id);
    let bills = data.bills_of_landlord(landlord_id);

    let mut open: Vec<_> = complaints
        .iter()
        .copied()
        .filter(|complaint| complaint.status.is_open())
        .collect();
    open.sort_by_key(|complaint| std::cmp::Reverse(complaint.latest_activity()));

    let recent_complaints = open
        .into_iter()
        .take(RECENT_COMPLAINTS)
        .map(|complaint| {
            ComplaintCard::for_landlord(
                complaint,
                data.property_name(complaint.property_id),
                data.user_name(complaint.tenant_id),
            )
        })
        .collect();

    Ok(Json(LandlordDashboardResponse {
        welcome: format!("Olá, {}", auth_user.user.name),
        properties: data.properties_of_landlord(landlord_id).len(),
        tenants: data.tenants_of_landlord(landlord_id).len(),
        today: format_day_month(Utc::now().date_naive()),
        complaints: status_counts(complaints.iter().copied()),
        bills: status_counts(bills.iter().copied()),
        recent_complaints,
    }))
}

/// Properties owned by the landlord, with the current tenant
#[utoipa::path(
    get,
    path = "/api/v1/landlord/properties",
    tag = "landlord",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Imóveis", body = Vec<PropertyCard>),
        (status = 403, description = "Acesso negado")
    )
)]
pub async fn list_properties(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<Vec<PropertyCard>>> {
    let data = state.store.read().await;

    let cards = data
        .properties_of_landlord(auth_user.user_id)
        .into_iter()
        .map(|property| {
            PropertyCard::render(property)
                .with_tenant(property.tenant_id.and_then(|id| data.user_name(id)))
        })
        .collect();

    Ok(Json(cards))
}

/// Tenants living in the landlord's properties
#[utoipa::path(
    get,
    path = "/api/v1/landlord/tenants",
    tag = "landlord",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Moradores", body = Vec<TenantSummary>),
        (status = 403, description = "Acesso negado")
    )
)]
pub async fn list_tenants(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<Vec<TenantSummary>>> {
    let data = state.store.read().await;

    let tenants = data
        .tenants_of_landlord(auth_user.user_id)
        .into_iter()
        .map(|tenant| {
            let bills = data.bills_of_tenant(tenant.id);
            let open_bills = count_by_status(bills.iter().copied(), BillStatus::Pending)
                + count_by_status(bills.iter().copied(), BillStatus::Overdue);

            TenantSummary {
                id: tenant.id,
                name: tenant.name.clone(),
                email: tenant.email.clone(),
                phone: tenant.phone.clone(),
                property_name: data
                    .property_of_tenant(tenant.id)
                    .map(|property| property.name.clone()),
                open_bills,
                open_complaints: data
                    .complaints_of_tenant(tenant.id)
                    .iter()
                    .filter(|complaint| complaint.status.is_open())
                    .count(),
            }
        })
        .collect();

    Ok(Json(tenants))
}

use axum::{
    extract::State,
    middleware::from_fn_with_state,
    routing::{get, post},
    Json, Router,
};

use super::{bills, complaints, support, users};
use crate::cards::{BillCard, ComplaintCard, PropertyCard};
use crate::error::AppResult;
use crate::middleware::{require_role, AppState, AuthUser};
use crate::models::{TenantDashboardResponse, UserRole};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/bills", get(bills::list_tenant_bills))
        .route("/bills/:id", get(bills::get_tenant_bill))
        .route("/bills/:id/receipt", post(bills::upload_receipt))
        .route(
            "/complaints",
            get(complaints::list_tenant_complaints).post(complaints::create_complaint),
        )
        .route("/complaints/images", post(complaints::upload_complaint_image))
        .route("/complaints/:id", get(complaints::get_tenant_complaint))
        .route(
            "/support/messages",
            get(support::get_messages).post(support::send_message),
        )
        .nest("/profile", users::routes())
        .route_layer(from_fn_with_state(UserRole::Tenant, require_role))
}

/// Tenant home: the rented property, next bill due and latest open complaint
#[utoipa::path(
    get,
    path = "/api/v1/tenant/dashboard",
    tag = "tenant",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Início do locatário", body = TenantDashboardResponse),
        (status = 403, description = "Acesso negado")
    )
)]
pub async fn dashboard(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<TenantDashboardResponse>> {
    let data = state.store.read().await;

    let bills = data.bills_of_tenant(auth_user.user_id);
    let open_bills: Vec<_> = bills.iter().filter(|bill| bill.status.is_open()).collect();
    let upcoming_bill = open_bills
        .iter()
        .min_by_key(|bill| bill.due_date)
        .map(|bill| BillCard::for_tenant(bill));

    let complaints = data.complaints_of_tenant(auth_user.user_id);
    let open_complaints: Vec<_> = complaints
        .iter()
        .filter(|complaint| complaint.status.is_open())
        .collect();
    let recent_complaint = open_complaints
        .iter()
        .max_by_key(|complaint| complaint.latest_activity())
        .map(|complaint| ComplaintCard::for_tenant(complaint));

    Ok(Json(TenantDashboardResponse {
        welcome: format!("Olá, {}", auth_user.user.name),
        property: data
            .property_of_tenant(auth_user.user_id)
            .map(PropertyCard::render),
        upcoming_bill,
        recent_complaint,
        open_bills: open_bills.len(),
        open_complaints: open_complaints.len(),
    }))
}

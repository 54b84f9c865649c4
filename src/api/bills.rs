use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::cards::BillCard;
use crate::error::{AppError, AppResult};
use crate::middleware::{ApiJson, AppState, AuthUser};
use crate::models::{
    count_by_status, filter_by_status, filter_chips, status_counts, Bill, BillDetailResponse,
    BillListResponse, BillStatus, BillSummary, BillsQuery, OverdueSweepRequest,
    OverdueSweepResponse, Receipt, ReceiptUploadResponse, StatusFilter,
};
use crate::services::{
    file_service::{
        format_kilobytes, read_multipart_file, validate_receipt_content_type, MAX_RECEIPT_SIZE,
    },
    FileService,
};
use crate::utils::format::format_brl;

pub const EMPTY_BILLS_MESSAGE: &str = "Nenhum boleto encontrado para o filtro selecionado.";

fn bill_not_found() -> AppError {
    AppError::NotFound("Boleto não encontrado".to_string())
}

fn summarize(bills: &[&Bill]) -> BillSummary {
    let total_open: Decimal = bills
        .iter()
        .filter(|bill| bill.status.is_open())
        .map(|bill| bill.amount)
        .sum();

    BillSummary {
        pending: count_by_status(bills.iter().copied(), BillStatus::Pending),
        paid: count_by_status(bills.iter().copied(), BillStatus::Paid),
        overdue: count_by_status(bills.iter().copied(), BillStatus::Overdue),
        total_open: format_brl(total_open),
    }
}

fn bill_list(
    bills: Vec<&Bill>,
    filter: StatusFilter<BillStatus>,
    render: impl Fn(&Bill) -> BillCard,
) -> BillListResponse {
    let cards: Vec<BillCard> = filter_by_status(bills.iter().copied(), &filter)
        .into_iter()
        .map(render)
        .collect();

    BillListResponse {
        filter: filter.as_str().to_string(),
        summary: summarize(&bills),
        counts: status_counts(bills.iter().copied()),
        filters: filter_chips(bills.iter().copied(), &filter),
        empty_message: cards.is_empty().then(|| EMPTY_BILLS_MESSAGE.to_string()),
        bills: cards,
    }
}

/// Tenant bills, filtered by status
#[utoipa::path(
    get,
    path = "/api/v1/tenant/bills",
    tag = "bills",
    security(("bearer_auth" = [])),
    params(BillsQuery),
    responses(
        (status = 200, description = "Boletos do locatário", body = BillListResponse),
        (status = 403, description = "Acesso negado"),
        (status = 422, description = "Filtro inválido")
    )
)]
pub async fn list_tenant_bills(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(query): Query<BillsQuery>,
) -> AppResult<Json<BillListResponse>> {
    let filter = StatusFilter::<BillStatus>::parse(query.status.as_deref())?;

    let data = state.store.read().await;
    let bills = data.bills_of_tenant(auth_user.user_id);

    Ok(Json(bill_list(bills, filter, BillCard::for_tenant)))
}

/// Single tenant bill
#[utoipa::path(
    get,
    path = "/api/v1/tenant/bills/{id}",
    tag = "bills",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Bill ID")),
    responses(
        (status = 200, description = "Detalhes do boleto", body = BillDetailResponse),
        (status = 404, description = "Boleto não encontrado")
    )
)]
pub async fn get_tenant_bill(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BillDetailResponse>> {
    let data = state.store.read().await;
    let bill = data
        .tenant_bill(auth_user.user_id, id)
        .ok_or_else(bill_not_found)?;

    Ok(Json(BillDetailResponse {
        bill: BillCard::for_tenant(bill),
        property_name: data.property_name(bill.property_id),
        receipt: bill.receipt.clone(),
    }))
}

/// Attach a payment receipt; the bill becomes paid
#[utoipa::path(
    post,
    path = "/api/v1/tenant/bills/{id}/receipt",
    tag = "bills",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Bill ID")),
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Comprovante anexado", body = ReceiptUploadResponse),
        (status = 400, description = "Arquivo inválido"),
        (status = 404, description = "Boleto não encontrado"),
        (status = 409, description = "Boleto já está pago")
    )
)]
pub async fn upload_receipt(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> AppResult<Json<ReceiptUploadResponse>> {
    {
        let data = state.store.read().await;
        let bill = data
            .tenant_bill(auth_user.user_id, id)
            .ok_or_else(bill_not_found)?;
        if bill.status == BillStatus::Paid {
            return Err(AppError::Conflict("Boleto já está pago".to_string()));
        }
    }

    let upload = read_multipart_file(
        &mut multipart,
        "receipt",
        validate_receipt_content_type,
        MAX_RECEIPT_SIZE,
    )
    .await?;
    let file_name = upload.file_name.clone();
    let content_type = upload.content_type.clone();

    let file_service = FileService::new(state.store.clone(), &state.config);
    let stored = file_service
        .upload_file("receipts", auth_user.user_id, upload)
        .await?;

    let now = Utc::now();
    let receipt = Receipt {
        file_name: file_name.clone(),
        size: stored.size,
        content_type,
        url: stored.url.clone(),
        uploaded_at: now,
    };

    let mut data = state.store.write().await;
    let attached = match data.tenant_bill_mut(auth_user.user_id, id) {
        Some(bill) => bill
            .attach_receipt(receipt, now.date_naive())
            .map(|_| BillCard::for_tenant(bill)),
        None => Err(bill_not_found()),
    };

    let card = match attached {
        Ok(card) => card,
        Err(err) => {
            // Paid by a concurrent upload; drop the orphaned file.
            data.files.remove(&stored.key);
            return Err(err);
        }
    };

    tracing::info!(
        user_id = %auth_user.user_id,
        bill_id = %id,
        size = stored.size,
        "Receipt attached"
    );

    Ok(Json(ReceiptUploadResponse {
        success: true,
        message: format!(
            "Comprovante anexado com sucesso!\nNome: {}\nTamanho: {}",
            file_name,
            format_kilobytes(stored.size)
        ),
        bill: card,
    }))
}

/// Bills across the landlord's properties
#[utoipa::path(
    get,
    path = "/api/v1/landlord/bills",
    tag = "bills",
    security(("bearer_auth" = [])),
    params(BillsQuery),
    responses(
        (status = 200, description = "Boletos dos imóveis", body = BillListResponse),
        (status = 403, description = "Acesso negado"),
        (status = 422, description = "Filtro inválido")
    )
)]
pub async fn list_landlord_bills(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(query): Query<BillsQuery>,
) -> AppResult<Json<BillListResponse>> {
    let filter = StatusFilter::<BillStatus>::parse(query.status.as_deref())?;

    let data = state.store.read().await;
    let bills = data.bills_of_landlord(auth_user.user_id);

    Ok(Json(bill_list(bills, filter, |bill| {
        BillCard::for_landlord(bill, data.user_name(bill.tenant_id))
    })))
}

/// Mark unpaid bills past their due date as overdue
#[utoipa::path(
    post,
    path = "/api/v1/landlord/bills/overdue-sweep",
    tag = "bills",
    security(("bearer_auth" = [])),
    request_body = OverdueSweepRequest,
    responses(
        (status = 200, description = "Boletos atualizados", body = OverdueSweepResponse),
        (status = 403, description = "Acesso negado")
    )
)]
pub async fn overdue_sweep(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ApiJson(payload): ApiJson<OverdueSweepRequest>,
) -> AppResult<Json<OverdueSweepResponse>> {
    let as_of = payload.as_of.unwrap_or_else(|| Utc::now().date_naive());

    let mut data = state.store.write().await;
    let updated = data
        .landlord_bills_mut(auth_user.user_id)
        .into_iter()
        .map(|bill| bill.refresh_overdue(as_of))
        .filter(|changed| *changed)
        .count();

    tracing::info!(landlord_id = %auth_user.user_id, %as_of, updated, "Overdue sweep");

    Ok(Json(OverdueSweepResponse {
        success: true,
        as_of,
        updated,
    }))
}

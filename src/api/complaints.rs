use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::cards::ComplaintCard;
use crate::error::{AppError, AppResult};
use crate::middleware::{ApiJson, AppState, AuthUser};
use crate::models::{
    filter_by_status, filter_chips, AddReplyRequest, Complaint, ComplaintDetailResponse,
    ComplaintListResponse, ComplaintReplyView, ComplaintStatus, ComplaintsQuery,
    CreateComplaintRequest, CreateComplaintResponse, ImageUploadResponse, StatusDisplay,
    StatusFilter, UpdateComplaintStatusRequest,
};
use crate::services::{
    file_service::{
        in_folder, orphan_image_ttl, read_multipart_file, validate_image_content_type,
        COMPLAINT_IMAGES_FOLDER, MAX_IMAGE_SIZE,
    },
    FileService,
};
use crate::store::StoreData;
use crate::utils::{format::format_date, validators::is_blank};

pub const EMPTY_COMPLAINTS_MESSAGE: &str = "Nenhum chamado encontrado para o filtro selecionado.";
pub const MISSING_FIELDS_MESSAGE: &str = "Por favor, preencha o título e a descrição do chamado.";
pub const COMPLAINT_CREATED_MESSAGE: &str = "Chamado registrado com sucesso!";

fn complaint_not_found() -> AppError {
    AppError::NotFound("Chamado não encontrado".to_string())
}

fn complaint_list(
    complaints: Vec<&Complaint>,
    filter: StatusFilter<ComplaintStatus>,
    render: impl Fn(&Complaint) -> ComplaintCard,
) -> ComplaintListResponse {
    let cards: Vec<ComplaintCard> = filter_by_status(complaints.iter().copied(), &filter)
        .into_iter()
        .map(render)
        .collect();

    ComplaintListResponse {
        filter: filter.as_str().to_string(),
        filters: filter_chips(complaints.iter().copied(), &filter),
        empty_message: cards
            .is_empty()
            .then(|| EMPTY_COMPLAINTS_MESSAGE.to_string()),
        complaints: cards,
    }
}

fn build_detail(data: &StoreData, complaint: &Complaint) -> ComplaintDetailResponse {
    ComplaintDetailResponse {
        id: complaint.id,
        title: complaint.title.clone(),
        description: complaint.description.clone(),
        date: format_date(complaint.date),
        status: complaint.status,
        badge: complaint.status.badge(),
        image_url: complaint.image_url.clone(),
        property_name: data.property_name(complaint.property_id),
        tenant_name: data.user_name(complaint.tenant_id),
        responses: complaint
            .responses
            .iter()
            .map(|reply| ComplaintReplyView {
                id: reply.id,
                message: reply.message.clone(),
                date: format_date(reply.date),
                is_landlord: reply.is_landlord,
            })
            .collect(),
    }
}

/// Only complaint photos this tenant uploaded may be attached to a complaint.
fn check_attachment(data: &StoreData, url: &str, owner: Uuid) -> AppResult<()> {
    let owned = FileService::get_key_from_url(url)
        .filter(|key| in_folder(key, COMPLAINT_IMAGES_FOLDER))
        .and_then(|key| data.files.get(&key))
        .is_some_and(|file| file.uploaded_by == owner && file.content_type.starts_with("image/"));

    if owned {
        Ok(())
    } else {
        Err(AppError::Validation("Imagem inválida".to_string()))
    }
}

/// Tenant complaints, filtered by status
#[utoipa::path(
    get,
    path = "/api/v1/tenant/complaints",
    tag = "complaints",
    security(("bearer_auth" = [])),
    params(ComplaintsQuery),
    responses(
        (status = 200, description = "Chamados do locatário", body = ComplaintListResponse),
        (status = 403, description = "Acesso negado"),
        (status = 422, description = "Filtro inválido")
    )
)]
pub async fn list_tenant_complaints(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(query): Query<ComplaintsQuery>,
) -> AppResult<Json<ComplaintListResponse>> {
    let filter = StatusFilter::<ComplaintStatus>::parse(query.status.as_deref())?;

    let data = state.store.read().await;
    let complaints = data.complaints_of_tenant(auth_user.user_id);

    Ok(Json(complaint_list(complaints, filter, ComplaintCard::for_tenant)))
}

/// Open a complaint
#[utoipa::path(
    post,
    path = "/api/v1/tenant/complaints",
    tag = "complaints",
    security(("bearer_auth" = [])),
    request_body = CreateComplaintRequest,
    responses(
        (status = 201, description = "Chamado registrado", body = CreateComplaintResponse),
        (status = 403, description = "Nenhum imóvel vinculado"),
        (status = 422, description = "Título ou descrição em branco")
    )
)]
pub async fn create_complaint(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ApiJson(payload): ApiJson<CreateComplaintRequest>,
) -> AppResult<(StatusCode, Json<CreateComplaintResponse>)> {
    if is_blank(&payload.title) || is_blank(&payload.description) {
        return Err(AppError::Validation(MISSING_FIELDS_MESSAGE.to_string()));
    }
    payload.validate()?;

    let mut data = state.store.write().await;

    let property_id = data
        .property_of_tenant(auth_user.user_id)
        .map(|property| property.id)
        .ok_or(AppError::Forbidden)?;

    if let Some(url) = &payload.image_url {
        check_attachment(&data, url, auth_user.user_id)?;
    }

    let now = Utc::now();
    let complaint = Complaint {
        id: Uuid::new_v4(),
        tenant_id: auth_user.user_id,
        property_id,
        title: payload.title.trim().to_string(),
        description: payload.description.trim().to_string(),
        date: now.date_naive(),
        status: ComplaintStatus::New,
        image_url: payload.image_url,
        responses: Vec::new(),
        created_at: now,
    };
    let card = ComplaintCard::for_tenant(&complaint);

    // Newest first, as the list screens show them.
    data.complaints.insert(0, complaint);

    tracing::info!(
        user_id = %auth_user.user_id,
        complaint_id = %card.id,
        "Complaint created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateComplaintResponse {
            success: true,
            message: COMPLAINT_CREATED_MESSAGE.to_string(),
            complaint: card,
        }),
    ))
}

/// Complaint details with the reply thread
#[utoipa::path(
    get,
    path = "/api/v1/tenant/complaints/{id}",
    tag = "complaints",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Complaint ID")),
    responses(
        (status = 200, description = "Detalhes do chamado", body = ComplaintDetailResponse),
        (status = 404, description = "Chamado não encontrado")
    )
)]
pub async fn get_tenant_complaint(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ComplaintDetailResponse>> {
    let data = state.store.read().await;
    let complaint = data
        .tenant_complaint(auth_user.user_id, id)
        .ok_or_else(complaint_not_found)?;

    Ok(Json(build_detail(&data, complaint)))
}

/// Upload a photo to attach to a new complaint
#[utoipa::path(
    post,
    path = "/api/v1/tenant/complaints/images",
    tag = "complaints",
    security(("bearer_auth" = [])),
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Imagem enviada", body = ImageUploadResponse),
        (status = 400, description = "Arquivo inválido")
    )
)]
pub async fn upload_complaint_image(
    State(state): State<AppState>,
    auth_user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Json<ImageUploadResponse>> {
    let upload = read_multipart_file(
        &mut multipart,
        "image",
        validate_image_content_type,
        MAX_IMAGE_SIZE,
    )
    .await?;

    let file_service = FileService::new(state.store.clone(), &state.config);
    let pruned = file_service
        .prune_unattached_images(auth_user.user_id, Utc::now() - orphan_image_ttl())
        .await;
    if pruned > 0 {
        tracing::debug!(user_id = %auth_user.user_id, pruned, "Unattached complaint images removed");
    }

    let stored = file_service
        .upload_file(COMPLAINT_IMAGES_FOLDER, auth_user.user_id, upload)
        .await?;

    Ok(Json(ImageUploadResponse {
        success: true,
        url: stored.url,
    }))
}

/// Complaints across the landlord's properties
#[utoipa::path(
    get,
    path = "/api/v1/landlord/complaints",
    tag = "complaints",
    security(("bearer_auth" = [])),
    params(ComplaintsQuery),
    responses(
        (status = 200, description = "Chamados dos imóveis", body = ComplaintListResponse),
        (status = 403, description = "Acesso negado"),
        (status = 422, description = "Filtro inválido")
    )
)]
pub async fn list_landlord_complaints(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(query): Query<ComplaintsQuery>,
) -> AppResult<Json<ComplaintListResponse>> {
    let filter = StatusFilter::<ComplaintStatus>::parse(query.status.as_deref())?;

    let data = state.store.read().await;
    let complaints = data.complaints_of_landlord(auth_user.user_id);

    Ok(Json(complaint_list(complaints, filter, |complaint| {
        ComplaintCard::for_landlord(
            complaint,
            data.property_name(complaint.property_id),
            data.user_name(complaint.tenant_id),
        )
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/landlord/complaints/{id}",
    tag = "complaints",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Complaint ID")),
    responses(
        (status = 200, description = "Detalhes do chamado", body = ComplaintDetailResponse),
        (status = 404, description = "Chamado não encontrado")
    )
)]
pub async fn get_landlord_complaint(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ComplaintDetailResponse>> {
    let data = state.store.read().await;
    let complaint = data
        .landlord_complaint(auth_user.user_id, id)
        .ok_or_else(complaint_not_found)?;

    Ok(Json(build_detail(&data, complaint)))
}

/// Landlord reply; the first one moves a new complaint to processing
#[utoipa::path(
    post,
    path = "/api/v1/landlord/complaints/{id}/responses",
    tag = "complaints",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Complaint ID")),
    request_body = AddReplyRequest,
    responses(
        (status = 200, description = "Resposta registrada", body = ComplaintDetailResponse),
        (status = 404, description = "Chamado não encontrado"),
        (status = 409, description = "Chamado já resolvido"),
        (status = 422, description = "Resposta em branco")
    )
)]
pub async fn add_reply(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<AddReplyRequest>,
) -> AppResult<Json<ComplaintDetailResponse>> {
    if is_blank(&payload.message) {
        return Err(AppError::Validation(
            "Por favor, escreva uma resposta.".to_string(),
        ));
    }
    payload.validate()?;

    let mut data = state.store.write().await;
    let complaint = data
        .landlord_complaint_mut(auth_user.user_id, id)
        .ok_or_else(complaint_not_found)?;

    complaint.add_reply(
        payload.message.trim().to_string(),
        Utc::now().date_naive(),
        true,
    )?;
    let status = complaint.status;

    tracing::info!(
        landlord_id = %auth_user.user_id,
        complaint_id = %id,
        status = status.as_str(),
        "Complaint reply added"
    );

    let complaint = data
        .landlord_complaint(auth_user.user_id, id)
        .ok_or_else(complaint_not_found)?;
    Ok(Json(build_detail(&data, complaint)))
}

/// Advance a complaint one step: new, processing, resolved
#[utoipa::path(
    put,
    path = "/api/v1/landlord/complaints/{id}/status",
    tag = "complaints",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Complaint ID")),
    request_body = UpdateComplaintStatusRequest,
    responses(
        (status = 200, description = "Status atualizado", body = ComplaintDetailResponse),
        (status = 404, description = "Chamado não encontrado"),
        (status = 409, description = "Transição inválida")
    )
)]
pub async fn update_complaint_status(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<UpdateComplaintStatusRequest>,
) -> AppResult<Json<ComplaintDetailResponse>> {
    let mut data = state.store.write().await;
    data.landlord_complaint_mut(auth_user.user_id, id)
        .ok_or_else(complaint_not_found)?
        .advance_to(payload.status)?;

    tracing::info!(
        landlord_id = %auth_user.user_id,
        complaint_id = %id,
        status = payload.status.as_str(),
        "Complaint status updated"
    );

    let complaint = data
        .landlord_complaint(auth_user.user_id, id)
        .ok_or_else(complaint_not_found)?;
    Ok(Json(build_detail(&data, complaint)))
}

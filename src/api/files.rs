use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Router,
};

use crate::error::AppResult;
use crate::middleware::AppState;
use crate::services::FileService;

pub fn routes() -> Router<AppState> {
    Router::new().route("/*key", get(get_file))
}

/// Serve a stored upload (receipt, complaint photo or avatar)
#[utoipa::path(
    get,
    path = "/api/v1/files/{key}",
    tag = "files",
    params(("key" = String, Path, description = "Storage key, e.g. `receipts/<uuid>.pdf`")),
    responses(
        (status = 200, description = "Conteúdo do arquivo"),
        (status = 404, description = "Arquivo não encontrado")
    )
)]
pub async fn get_file(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<impl IntoResponse> {
    let file = FileService::new(state.store.clone(), &state.config)
        .get_file(&key)
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, file.content_type),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{}\"", file.file_name.replace('"', "")),
            ),
        ],
        file.data,
    ))
}

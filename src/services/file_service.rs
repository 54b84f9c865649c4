use axum::extract::Multipart;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::cards::API_PREFIX;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::store::{Store, StoredFile};

pub const COMPLAINT_IMAGES_FOLDER: &str = "complaints";

/// Complaint photos not attached within this window are dropped.
pub fn orphan_image_ttl() -> Duration {
    Duration::hours(1)
}

pub fn in_folder(key: &str, folder: &str) -> bool {
    key.split_once('/').is_some_and(|(prefix, _)| prefix == folder)
}

/// A file taken from a multipart form, before it is stored.
#[derive(Debug)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub key: String,
    pub url: String,
    pub size: usize,
}

pub struct FileService {
    store: Arc<Store>,
    public_url: Option<String>,
}

impl FileService {
    pub fn new(store: Arc<Store>, config: &Config) -> Self {
        Self {
            store,
            public_url: config.files_public_url.clone(),
        }
    }

    pub async fn upload_file(
        &self,
        folder: &str,
        owner: Uuid,
        upload: Upload,
    ) -> AppResult<StoredUpload> {
        let extension = upload
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_else(|| "bin".to_string());

        let key = format!("{}/{}.{}", folder, Uuid::new_v4(), extension);
        let size = upload.data.len();

        self.store.write().await.files.insert(
            key.clone(),
            StoredFile {
                content_type: upload.content_type,
                file_name: upload.file_name,
                data: upload.data,
                uploaded_by: owner,
                created_at: Utc::now(),
            },
        );

        let path = format!("{}/files/{}", API_PREFIX, key);
        let url = match &self.public_url {
            Some(base_url) => format!("{}{}", base_url.trim_end_matches('/'), path),
            None => path,
        };

        Ok(StoredUpload { key, url, size })
    }

    pub async fn get_file(&self, key: &str) -> AppResult<StoredFile> {
        self.store
            .read()
            .await
            .files
            .get(key)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Arquivo não encontrado".to_string()))
    }

    /// Drops a stored upload; URLs outside the file store are ignored.
    pub async fn remove_by_url(&self, url: &str) -> bool {
        match Self::get_key_from_url(url) {
            Some(key) => self.store.write().await.files.remove(&key).is_some(),
            None => false,
        }
    }

    /// Removes the owner's complaint photos uploaded before `cutoff` that no complaint references.
    pub async fn prune_unattached_images(&self, owner: Uuid, cutoff: DateTime<Utc>) -> usize {
        let mut data = self.store.write().await;
        let attached: HashSet<String> = data
            .complaints
            .iter()
            .filter_map(|complaint| complaint.image_url.as_deref())
            .filter_map(Self::get_key_from_url)
            .collect();

        let before = data.files.len();
        data.files.retain(|key, file| {
            !(in_folder(key, COMPLAINT_IMAGES_FOLDER)
                && file.uploaded_by == owner
                && file.created_at < cutoff
                && !attached.contains(key))
        });
        before - data.files.len()
    }

    pub fn get_key_from_url(url: &str) -> Option<String> {
        let prefix = format!("{}/files/", API_PREFIX);
        url.find(&prefix)
            .map(|pos| url[pos + prefix.len()..].to_string())
    }
}

/// Reads the named file field from a multipart form, enforcing type and size.
pub async fn read_multipart_file(
    multipart: &mut Multipart,
    field_name: &str,
    accepts: fn(&str) -> bool,
    max_size: usize,
) -> AppResult<Upload> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(field_name) {
            continue;
        }

        let content_type = field
            .content_type()
            .ok_or_else(|| AppError::File("Content-Type ausente".to_string()))?
            .to_string();

        if !accepts(&content_type) {
            return Err(AppError::File("Formato de arquivo não suportado".to_string()));
        }

        let file_name = field.file_name().unwrap_or(field_name).to_string();

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::File(format!("Erro ao ler o arquivo: {}", e)))?;

        if data.is_empty() {
            return Err(AppError::File("Arquivo vazio".to_string()));
        }
        if data.len() > max_size {
            return Err(AppError::File("Arquivo muito grande".to_string()));
        }

        return Ok(Upload {
            file_name,
            content_type,
            data: data.to_vec(),
        });
    }

    Err(AppError::BadRequest(format!("Campo '{}' ausente", field_name)))
}

pub fn validate_image_content_type(content_type: &str) -> bool {
    matches!(
        content_type,
        "image/jpeg" | "image/png" | "image/gif" | "image/webp" | "image/heic"
    )
}

/// Receipts: any image or a PDF.
pub fn validate_receipt_content_type(content_type: &str) -> bool {
    content_type.starts_with("image/") || content_type == "application/pdf"
}

pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB
pub const MAX_RECEIPT_SIZE: usize = 20 * 1024 * 1024; // 20MB

/// `12.34 KB`, as shown in the receipt confirmation.
pub fn format_kilobytes(size: usize) -> String {
    format!("{:.2} KB", size as f64 / 1024.0)
}

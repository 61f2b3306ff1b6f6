use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use crate::documents::ingest::build_document;
use crate::documents::models::{DocumentKind, DocumentRecord};
use crate::documents::validation::{validate_upload, UploadMeta};
use crate::errors::AppError;
use crate::extraction::RawDocument;
use crate::state::AppState;

/// Multipart form field carrying the uploaded file.
const FILE_FIELD: &str = "file";

struct Upload {
    filename: String,
    content_type: Option<String>,
    bytes: Bytes,
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::field(FILE_FIELD, e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::field(FILE_FIELD, e.body_text()))?;
        return Ok(Upload {
            filename,
            content_type,
            bytes,
        });
    }
    Err(AppError::field(FILE_FIELD, "Multipart field 'file' is required"))
}

async fn upload_document(
    state: &AppState,
    kind: DocumentKind,
    multipart: Multipart,
) -> Result<(StatusCode, Json<DocumentRecord>), AppError> {
    let upload = read_upload(multipart).await?;
    validate_upload(
        &UploadMeta {
            filename: &upload.filename,
            content_type: upload.content_type.as_deref(),
            size: upload.bytes.len(),
        },
        state.config.max_upload_bytes,
    )
    .map_err(|errors| {
        warn!(filename = %upload.filename, rejected = errors.len(), "Upload rejected");
        AppError::Validation(errors)
    })?;

    let raw = RawDocument::new(upload.bytes, upload.filename)?;
    let record = tokio::task::spawn_blocking(move || build_document(kind, &raw))
        .await
        .map_err(anyhow::Error::from)??;

    state.store.insert_document(record.clone()).await?;
    info!(id = %record.id, kind = kind.label(), "Document stored");
    Ok((StatusCode::CREATED, Json(record)))
}

async fn get_document(
    state: &AppState,
    kind: DocumentKind,
    id: Uuid,
) -> Result<Json<DocumentRecord>, AppError> {
    state
        .store
        .get_document(kind, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("{} {id} not found", kind.label())))
}

async fn delete_document(
    state: &AppState,
    kind: DocumentKind,
    id: Uuid,
) -> Result<StatusCode, AppError> {
    if !state.store.delete_document(kind, id).await? {
        return Err(AppError::NotFound(format!("{} {id} not found", kind.label())));
    }
    if kind == DocumentKind::JobDescription {
        let removed = state.store.delete_analyses(id).await?;
        info!(%id, removed, "Deleted analyses for job description");
    }
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Job descriptions
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/job-descriptions
pub async fn handle_upload_job_description(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<DocumentRecord>), AppError> {
    upload_document(&state, DocumentKind::JobDescription, multipart).await
}

/// GET /api/v1/job-descriptions
pub async fn handle_list_job_descriptions(
    State(state): State<AppState>,
) -> Result<Json<Vec<DocumentRecord>>, AppError> {
    Ok(Json(state.store.list_documents(DocumentKind::JobDescription).await?))
}

/// GET /api/v1/job-descriptions/:id
pub async fn handle_get_job_description(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentRecord>, AppError> {
    get_document(&state, DocumentKind::JobDescription, id).await
}

/// DELETE /api/v1/job-descriptions/:id
/// Also removes every analysis run against it.
pub async fn handle_delete_job_description(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    delete_document(&state, DocumentKind::JobDescription, id).await
}

// ────────────────────────────────────────────────────────────────────────────
// CVs
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/cvs
pub async fn handle_upload_cv(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<DocumentRecord>), AppError> {
    upload_document(&state, DocumentKind::Cv, multipart).await
}

/// GET /api/v1/cvs
pub async fn handle_list_cvs(
    State(state): State<AppState>,
) -> Result<Json<Vec<DocumentRecord>>, AppError> {
    Ok(Json(state.store.list_documents(DocumentKind::Cv).await?))
}

/// GET /api/v1/cvs/:id
pub async fn handle_get_cv(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentRecord>, AppError> {
    get_document(&state, DocumentKind::Cv, id).await
}

/// DELETE /api/v1/cvs/:id
pub async fn handle_delete_cv(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    delete_document(&state, DocumentKind::Cv, id).await
}

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::analysis::service::{
    run_analysis, stored_results, top_results, AnalysisRequest, AnalysisResponse,
};
use crate::documents::{AnalysisResult, DocumentKind};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct TopQuery {
    pub count: Option<usize>,
}

/// POST /api/v1/analyses
pub async fn handle_create_analysis(
    State(state): State<AppState>,
    Json(req): Json<AnalysisRequest>,
) -> Result<(StatusCode, Json<AnalysisResponse>), AppError> {
    let response = run_analysis(state.store.as_ref(), state.scorer.as_ref(), &req).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/analyses/:job_description_id
pub async fn handle_get_analyses(
    State(state): State<AppState>,
    Path(job_description_id): Path<Uuid>,
) -> Result<Json<Vec<AnalysisResult>>, AppError> {
    Ok(Json(stored_results(state.store.as_ref(), job_description_id).await?))
}

/// GET /api/v1/analyses/:job_description_id/top?count=N
pub async fn handle_top_candidates(
    State(state): State<AppState>,
    Path(job_description_id): Path<Uuid>,
    Query(params): Query<TopQuery>,
) -> Result<Json<Vec<AnalysisResult>>, AppError> {
    let count = params.count.unwrap_or(state.config.top_candidates);
    if count == 0 {
        return Err(AppError::field("count", "count must be at least 1"));
    }
    Ok(Json(
        top_results(state.store.as_ref(), job_description_id, count).await?,
    ))
}

/// DELETE /api/v1/analyses/:job_description_id
pub async fn handle_delete_analyses(
    State(state): State<AppState>,
    Path(job_description_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state
        .store
        .get_document(DocumentKind::JobDescription, job_description_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound(format!(
            "Job description {job_description_id} not found"
        )));
    }
    let removed = state.store.delete_analyses(job_description_id).await?;
    info!(%job_description_id, removed, "Analyses deleted");
    Ok(StatusCode::NO_CONTENT)
}

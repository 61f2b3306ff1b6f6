use std::collections::{HashMap, HashSet};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::documents::{AnalysisRecord, AnalysisResult, DocumentKind, RecordStore};
use crate::errors::{AppError, FieldError};
use crate::matching::{rank_candidates, top_candidates, MatchScorer};

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    pub job_description_id: Uuid,
    pub cv_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub job_description_id: Uuid,
    /// In `cv_ids` order.
    pub results: Vec<AnalysisResult>,
    /// Same results, best score first; equal scores keep `results` order.
    pub sorted_candidates: Vec<AnalysisResult>,
}

pub fn validate_request(req: &AnalysisRequest) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    if req.cv_ids.is_empty() {
        errors.push(FieldError::new("cv_ids", "At least one CV id is required"));
    }
    let unique: HashSet<&Uuid> = req.cv_ids.iter().collect();
    if unique.len() != req.cv_ids.len() {
        errors.push(FieldError::new("cv_ids", "CV ids must be unique"));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Scores every requested CV against one job description and stores the results.
///
/// Algorithm:
/// 1. Validate the request; load the job description (404 when unknown)
/// 2. Load the requested CVs, skipping unknown ids (404 when none remain)
/// 3. Score each CV independently against the job description's skills
/// 4. Persist the analyses and return them in request order and ranked
pub async fn run_analysis(
    store: &dyn RecordStore,
    scorer: &dyn MatchScorer,
    req: &AnalysisRequest,
) -> Result<AnalysisResponse, AppError> {
    validate_request(req).map_err(AppError::Validation)?;

    let jd = store
        .get_document(DocumentKind::JobDescription, req.job_description_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Job description {} not found", req.job_description_id))
        })?;

    let cvs = store.find_documents(DocumentKind::Cv, &req.cv_ids).await?;
    if cvs.is_empty() {
        return Err(AppError::NotFound("No CVs found for the given ids".to_string()));
    }

    let now = Utc::now();
    let results: Vec<AnalysisResult> = cvs
        .into_iter()
        .map(|cv| {
            let report = scorer.score(
                jd.id,
                jd.extracted_skills.as_slice(),
                cv.id,
                cv.extracted_skills.as_slice(),
            );
            AnalysisResult {
                analysis: AnalysisRecord {
                    id: Uuid::new_v4(),
                    report,
                    created_at: now,
                },
                cv,
            }
        })
        .collect();

    store
        .insert_analyses(results.iter().map(|r| r.analysis.clone()).collect())
        .await?;

    info!(
        job_description_id = %jd.id,
        candidates = results.len(),
        "Analysis completed"
    );

    let sorted_candidates = rank_candidates(results.clone());
    Ok(AnalysisResponse {
        job_description_id: jd.id,
        results,
        sorted_candidates,
    })
}

/// Stored analyses for a job description, best first, joined with their CVs.
/// Analyses whose CV has since been deleted are dropped.
pub async fn stored_results(
    store: &dyn RecordStore,
    job_description_id: Uuid,
) -> Result<Vec<AnalysisResult>, AppError> {
    if store
        .get_document(DocumentKind::JobDescription, job_description_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound(format!(
            "Job description {job_description_id} not found"
        )));
    }

    let analyses = store.list_analyses(job_description_id).await?;
    let cv_ids: Vec<Uuid> = analyses.iter().map(|a| a.report.candidate_set_id).collect();
    let cvs: HashMap<Uuid, _> = store
        .find_documents(DocumentKind::Cv, &cv_ids)
        .await?
        .into_iter()
        .map(|cv| (cv.id, cv))
        .collect();

    Ok(analyses
        .into_iter()
        .filter_map(|analysis| {
            let cv = cvs.get(&analysis.report.candidate_set_id)?.clone();
            Some(AnalysisResult { analysis, cv })
        })
        .collect())
}

pub async fn top_results(
    store: &dyn RecordStore,
    job_description_id: Uuid,
    count: usize,
) -> Result<Vec<AnalysisResult>, AppError> {
    let results = stored_results(store, job_description_id).await?;
    Ok(top_candidates(results, count))
}

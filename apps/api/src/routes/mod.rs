pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::documents::handlers as documents;
use crate::state::AppState;

/// Room for multipart framing on top of the largest accepted file.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        // Job descriptions
        .route(
            "/api/v1/job-descriptions",
            get(documents::handle_list_job_descriptions)
                .post(documents::handle_upload_job_description),
        )
        .route(
            "/api/v1/job-descriptions/:id",
            get(documents::handle_get_job_description)
                .delete(documents::handle_delete_job_description),
        )
        // CVs
        .route(
            "/api/v1/cvs",
            get(documents::handle_list_cvs).post(documents::handle_upload_cv),
        )
        .route(
            "/api/v1/cvs/:id",
            get(documents::handle_get_cv).delete(documents::handle_delete_cv),
        )
        // Analyses
        .route("/api/v1/analyses", post(analysis::handle_create_analysis))
        .route(
            "/api/v1/analyses/:job_description_id",
            get(analysis::handle_get_analyses).delete(analysis::handle_delete_analyses),
        )
        .route(
            "/api/v1/analyses/:job_description_id/top",
            get(analysis::handle_top_candidates),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::documents::InMemoryStore;
    use crate::matching::SkillOverlapScorer;

    const BOUNDARY: &str = "skillmatch-test-boundary";

    fn app() -> Router {
        build_router(AppState {
            store: Arc::new(InMemoryStore::new()),
            scorer: Arc::new(SkillOverlapScorer),
            config: Config::default(),
        })
    }

    fn upload(uri: &str, filename: &str, content_type: &str, content: &[u8]) -> Request<Body> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn create(app: &Router, uri: &str, filename: &str, text: &str) -> Value {
        let response = app
            .clone()
            .oneshot(upload(uri, filename, "text/plain", text.as_bytes()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }

    #[tokio::test]
    async fn test_health() {
        let response = app().oneshot(empty_request("GET", "/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_upload_extracts_skills() {
        let app = app();
        let jd = create(
            &app,
            "/api/v1/job-descriptions",
            "jd.txt",
            "Looking for React, Node.js and AWS.",
        )
        .await;

        assert_eq!(jd["kind"], "job_description");
        assert_eq!(jd["recovery_quality"], "full");
        assert_eq!(jd["extracted_skills"], json!(["AWS", "Node.js", "React"]));
        assert!(jd["advisory"].is_null());
    }

    #[tokio::test]
    async fn test_upload_rejects_disallowed_extension() {
        let response = app()
            .oneshot(upload("/api/v1/cvs", "cv.odt", "application/octet-stream", b"Rust"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["details"][0]["field"], "extension");
    }

    #[tokio::test]
    async fn test_corrupt_docx_is_unprocessable() {
        let response = app()
            .oneshot(upload(
                "/api/v1/cvs",
                "cv.docx",
                "application/octet-stream",
                b"not a zip archive",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_analysis_flow() {
        let app = app();
        let jd = create(
            &app,
            "/api/v1/job-descriptions",
            "jd.txt",
            "Looking for React, Node.js and AWS.",
        )
        .await;
        let partial = create(&app, "/api/v1/cvs", "a.txt", "Built apps in React on AWS.").await;
        let full = create(&app, "/api/v1/cvs", "b.txt", "React, Node.js, AWS.").await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/analyses",
                json!({
                    "job_description_id": jd["id"],
                    "cv_ids": [partial["id"], full["id"]],
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let analysis = body_json(response).await;
        assert_eq!(analysis["results"][0]["match_score_percent"], 67);
        assert_eq!(analysis["results"][0]["skill_gaps"], json!(["Node.js"]));
        assert_eq!(analysis["sorted_candidates"][0]["cv"]["id"], full["id"]);
        assert!(analysis["results"][0].get("auxiliary_score").is_none());

        let jd_id = jd["id"].as_str().unwrap();
        let response = app
            .clone()
            .oneshot(empty_request(
                "GET",
                &format!("/api/v1/analyses/{jd_id}/top?count=1"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let top = body_json(response).await;
        assert_eq!(top.as_array().unwrap().len(), 1);
        assert_eq!(top[0]["match_score_percent"], 100);

        let response = app
            .clone()
            .oneshot(empty_request("DELETE", &format!("/api/v1/job-descriptions/{jd_id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(empty_request("GET", &format!("/api/v1/analyses/{jd_id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_analysis_requires_cv_ids() {
        let app = app();
        let jd = create(&app, "/api/v1/job-descriptions", "jd.txt", "Rust").await;
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/analyses",
                json!({ "job_description_id": jd["id"], "cv_ids": [] }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_cv_is_not_found() {
        let response = app()
            .oneshot(empty_request(
                "GET",
                "/api/v1/cvs/6f1c2a3e-0000-4000-8000-000000000000",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"]["code"], "NOT_FOUND");
    }
}

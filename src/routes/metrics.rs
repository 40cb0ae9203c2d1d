/**
 * Metrics Route Handlers
 * Endpoints receiving Core Web Vitals and image load reports from the browser
 */
use axum::{
    extract::{Extension, Json, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tower_http::request_id::RequestId;

use crate::perf::vitals::{evaluate, Evaluation, VitalsReport};
use crate::perf::{ImageLoadEvent, ImageSummary};
use crate::state::AppState;

/// Body for POST /api/metrics/images
#[derive(Debug, Deserialize, Serialize)]
pub struct ImageEventBatch {
    pub events: Vec<ImageLoadEvent>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageBatchResponse {
    pub received: usize,
    pub summary: ImageSummary,
}

fn request_id_str(request_id: &Option<Extension<RequestId>>) -> String {
    request_id
        .as_ref()
        .and_then(|ext| ext.0.header_value().to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

/// POST /api/metrics/vitals - Score a page's vitals and log the result
#[tracing::instrument(skip_all, fields(url = report.url.as_deref().unwrap_or("-")))]
pub async fn receive_vitals(
    request_id: Option<Extension<RequestId>>,
    Json(report): Json<VitalsReport>,
) -> Json<Evaluation> {
    let evaluation = evaluate(&report);
    let req_id = request_id_str(&request_id);

    if evaluation.recommendations.is_empty() {
        tracing::info!(request_id = %req_id, score = evaluation.score, "web vitals report");
    } else {
        tracing::warn!(
            request_id = %req_id,
            score = evaluation.score,
            ratings = ?evaluation.ratings,
            "web vitals below target"
        );
    }

    Json(evaluation)
}

/// POST /api/metrics/images - Ingest image load events
#[tracing::instrument(skip_all, fields(batch_size = batch.events.len()))]
pub async fn receive_image_events(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    Json(batch): Json<ImageEventBatch>,
) -> impl IntoResponse {
    let received = batch.events.len();
    let summary = state.image_metrics.record(batch.events).await;

    tracing::debug!(
        request_id = %request_id_str(&request_id),
        received,
        failures = summary.failures,
        "received image load events"
    );

    (StatusCode::ACCEPTED, Json(ImageBatchResponse { received, summary }))
}

/// GET /api/metrics/images - Summary of the retained events
pub async fn image_summary(State(state): State<AppState>) -> Json<ImageSummary> {
    Json(state.image_metrics.summary().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::{get, post};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn metrics_router(state: AppState) -> Router {
        Router::new()
            .route("/api/metrics/vitals", post(receive_vitals))
            .route("/api/metrics/images", post(receive_image_events).get(image_summary))
            .with_state(state)
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let req = Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_vitals_scored() {
        let (status, body) = post_json(
            metrics_router(AppState::for_tests()),
            "/api/metrics/vitals",
            json!({ "url": "/", "fcp": 1200.0, "lcp": 5000.0 }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 50);
        assert_eq!(body["ratings"]["fcp"], "good");
        assert_eq!(body["ratings"]["lcp"], "poor");
        assert_eq!(body["recommendations"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_image_events_summarized() {
        let state = AppState::for_tests();
        let (status, body) = post_json(
            metrics_router(state.clone()),
            "/api/metrics/images",
            json!({ "events": [
                { "src": "/a.png", "success": true, "loadTime": 80.0 },
                { "src": "/b.png", "success": false, "error": "404", "isFallback": true }
            ]}),
        )
        .await;
        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(body["received"], 2);
        assert_eq!(body["summary"]["failures"], 1);
        assert_eq!(body["summary"]["fallbacksUsed"], 1);

        let req = Request::get("/api/metrics/images").body(Body::empty()).unwrap();
        let res = metrics_router(state).oneshot(req).await.unwrap();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let summary: ImageSummary = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(summary.total, 2);
    }
}

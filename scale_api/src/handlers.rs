//! Request handlers for the acquisition endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;

use crate::models::{HealthBody, ReadingBody, ServiceStatus};
use crate::service::ScaleService;
use scale_core::AcquireError;

#[derive(Debug, Deserialize)]
pub struct ReadQuery {
    pub baud_rate: Option<u32>,
}

/// `GET /` liveness probe. Answers without touching any port.
pub async fn service_status() -> Json<ServiceStatus> {
    Json(ServiceStatus::now())
}

/// `GET /scale/{id}` runs one acquisition attempt.
pub async fn read_scale(
    State(service): State<Arc<ScaleService>>,
    Path(scale_id): Path<String>,
    Query(query): Query<ReadQuery>,
) -> Response {
    match run_acquisition(service, scale_id.clone(), query.baud_rate).await {
        Ok(reading) => {
            (StatusCode::OK, Json(ReadingBody::new(&scale_id, reading))).into_response()
        }
        Err(response) => response,
    }
}

/// `GET /scale/{id}/health` runs one acquisition at the default baud rate
/// and reports it as a health probe.
pub async fn scale_health(
    State(service): State<Arc<ScaleService>>,
    Path(scale_id): Path<String>,
) -> Response {
    match run_acquisition(service, scale_id.clone(), None).await {
        Ok(reading) => {
            (StatusCode::OK, Json(HealthBody::now(&scale_id, reading))).into_response()
        }
        Err(response) => response,
    }
}

// Acquisition blocks on serial I/O for seconds, so it runs off the runtime.
async fn run_acquisition(
    service: Arc<ScaleService>,
    scale_id: String,
    baud_rate: Option<u32>,
) -> Result<scale_core::Reading, Response> {
    let handle = tokio::task::spawn_blocking(move || service.acquire(&scale_id, baud_rate));
    match handle.await {
        Ok(Ok(reading)) => Ok(reading),
        Ok(Err(err)) => {
            let (status, body) = error_parts(&err);
            Err((status, Json(body)).into_response())
        }
        Err(join_err) => {
            tracing::error!(error = %join_err, "acquisition task failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "message": "internal error" })),
            )
                .into_response())
        }
    }
}

/// Status and body for a failed acquisition. Unknown ids get their own
/// shape so monitors can tell a bad URL from a misbehaving scale.
fn error_parts(err: &eyre::Report) -> (StatusCode, serde_json::Value) {
    if let Some(AcquireError::UnknownScale(id)) = err.downcast_ref::<AcquireError>() {
        tracing::debug!(scale_id = %id, "unknown scale requested");
        return (
            StatusCode::NOT_FOUND,
            json!({ "success": false, "error": "Invalid scale id." }),
        );
    }
    (
        StatusCode::BAD_REQUEST,
        json!({ "success": false, "message": err.to_string() }),
    )
}

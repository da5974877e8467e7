use super::AppState;
use crate::application::pdf_features::PdfFailure;
use crate::domain::errors::ExtractionError;
use crate::domain::extraction::ExtractionMode;
use crate::domain::prediction::{Granularity, Prediction, PredictionRequest};
use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, warn};

/// Handle GET /
pub async fn root() -> Json<Value> {
    Json(json!({ "status": "RideWise backend running" }))
}

/// Handle POST /predict/day
pub async fn predict_day(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PredictionRequest>,
) -> Json<Prediction> {
    predict(&state, request, Granularity::Daily)
}

/// Handle POST /predict/hour
pub async fn predict_hour(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PredictionRequest>,
) -> Json<Prediction> {
    predict(&state, request, Granularity::Hourly)
}

fn predict(
    state: &AppState,
    request: PredictionRequest,
    granularity: Granularity,
) -> Json<Prediction> {
    debug!("Received {} prediction request: {:?}", granularity, request);
    Json(state.context.predict(&request, granularity))
}

/// Handle POST /pdf/day
pub async fn pdf_day(State(state): State<Arc<AppState>>, multipart: Multipart) -> Response {
    extract_from_pdf(&state, multipart, ExtractionMode::Day).await
}

/// Handle POST /pdf/hour
pub async fn pdf_hour(State(state): State<Arc<AppState>>, multipart: Multipart) -> Response {
    extract_from_pdf(&state, multipart, ExtractionMode::Hour).await
}

async fn extract_from_pdf(
    state: &AppState,
    multipart: Multipart,
    mode: ExtractionMode,
) -> Response {
    let pdf = match read_upload(multipart).await {
        Ok(pdf) => pdf,
        Err(e) => {
            warn!("Rejected {} PDF upload: {}", mode, e);
            return (StatusCode::UNPROCESSABLE_ENTITY, Json(PdfFailure::from(&e))).into_response();
        }
    };
    debug!("Received {} PDF upload: {} bytes", mode, pdf.len());

    // External-call failures are reported in the body, not the status code
    match state.pdf.run(pdf, mode).await {
        Ok(extraction) => Json(extraction).into_response(),
        Err(e) => Json(PdfFailure::from(&e)).into_response(),
    }
}

/// Bytes of the `file` field, or of the first field carrying a filename.
async fn read_upload(mut multipart: Multipart) -> Result<Vec<u8>, ExtractionError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ExtractionError::InvalidUpload(e.body_text()))?
    {
        let is_file = field.name() == Some("file") || field.file_name().is_some();
        if !is_file {
            continue;
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ExtractionError::InvalidUpload(e.body_text()))?;
        return Ok(bytes.to_vec());
    }

    Err(ExtractionError::MissingUpload)
}

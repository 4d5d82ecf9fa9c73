use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Json, Response};
use tracing::debug;

use crate::HttpServerState;
use crate::error::{HttpServerError, Result, map_error_to_response};
use crate::types::{IngestRequest, IngestResponse};

/// Handler for the /ingest endpoint.
pub async fn ingest_handler(
    State(state): State<HttpServerState>,
    request: Result<Json<IngestRequest>, JsonRejection>,
) -> Response {
    match process_ingest_request(&state, request).await {
        Ok(response) => Json(response).into_response(),
        Err(err) => map_error_to_response(err),
    }
}

/// Validate the request and submit it to the ingestion service.
async fn process_ingest_request(
    state: &HttpServerState,
    request: Result<Json<IngestRequest>, JsonRejection>,
) -> Result<IngestResponse> {
    // Malformed bodies and unknown priority values are both client
    // validation errors.
    let Json(request) = request.map_err(|rejection| {
        let message = rejection.body_text();
        debug!(error = %message, "rejecting malformed ingest request");
        HttpServerError::Validation(message)
    })?;

    let ingestion_id = state
        .service()
        .submit(request.ids, request.priority)
        .await;

    Ok(IngestResponse { ingestion_id })
}

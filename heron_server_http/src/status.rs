use axum::extract::{Path, State};
use axum::response::{IntoResponse, Json, Response};
use heron_core::{CoreError, IngestionId};
use tracing::debug;

use crate::HttpServerState;
use crate::error::{HttpServerError, Result, map_error_to_response};
use crate::types::StatusResponse;

/// Handler for the /status/{ingestion_id} endpoint.
pub async fn status_handler(
    State(state): State<HttpServerState>,
    Path(ingestion_id): Path<String>,
) -> Response {
    match process_status_request(&state, &ingestion_id).await {
        Ok(response) => Json(response).into_response(),
        Err(err) => map_error_to_response(err),
    }
}

async fn process_status_request(
    state: &HttpServerState,
    raw_id: &str,
) -> Result<StatusResponse> {
    // An id that does not parse cannot name a known ingestion.
    let ingestion_id = IngestionId::parse(raw_id).map_err(|_| {
        debug!(raw_id, "status request with unparseable ingestion id");
        HttpServerError::NotFound(format!("ingestion {raw_id} not found"))
    })?;

    let ingestion = state
        .service()
        .status(ingestion_id)
        .await
        .map_err(|err| match err {
            CoreError::IngestionNotFound { .. } => {
                debug!(%ingestion_id, "status request for unknown ingestion");
                HttpServerError::NotFound(err.to_string())
            }
            other => HttpServerError::Internal(other.to_string()),
        })?;

    Ok(ingestion.into())
}

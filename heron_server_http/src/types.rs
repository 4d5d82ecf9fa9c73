//! Request and response types for the ingestion endpoints.

use heron_core::{BatchId, BatchStatus, Ingestion, IngestionId, IngestionStatus, Priority, RecordId};
use serde::{Deserialize, Serialize};

/// Request payload for the /ingest endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestRequest {
    /// Record identifiers to ingest.
    pub ids: Vec<RecordId>,
    /// Priority class applied to every batch derived from this request.
    pub priority: Priority,
}

/// Response payload for the /ingest endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngestResponse {
    pub ingestion_id: IngestionId,
}

/// Response payload for the /status endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusResponse {
    pub ingestion_id: IngestionId,
    /// Overall status derived from the batch statuses at read time.
    pub status: IngestionStatus,
    pub batches: Vec<BatchStatusResponse>,
}

/// Status of a single batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchStatusResponse {
    pub batch_id: BatchId,
    pub ids: Vec<RecordId>,
    pub status: BatchStatus,
}

/// Response payload for errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub message: String,
}

impl From<Ingestion> for StatusResponse {
    fn from(ingestion: Ingestion) -> Self {
        let status = ingestion.overall_status();

        Self {
            ingestion_id: ingestion.id,
            status,
            batches: ingestion
                .batches
                .into_iter()
                .map(|batch| BatchStatusResponse {
                    batch_id: batch.id,
                    ids: batch.records,
                    status: batch.status,
                })
                .collect(),
        }
    }
}

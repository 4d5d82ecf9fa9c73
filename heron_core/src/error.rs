use snafu::Snafu;

use crate::types::{BatchId, BatchStatus, IngestionId};

/// Core error types.
///
/// The message associated with an error is forwarded to the client by the
/// HTTP layer, for this reason it should contain information that is useful
/// to the user.
#[derive(Debug, Clone, Snafu)]
#[snafu(visibility(pub))]
pub enum CoreError {
    /// Unknown ingestion identifier.
    #[snafu(display("ingestion {id} not found"))]
    IngestionNotFound { id: IngestionId },
    /// Unknown batch identifier within an existing ingestion.
    #[snafu(display("batch {id} not found"))]
    BatchNotFound { id: BatchId },
    /// Attempted non-forward status change.
    ///
    /// The scheduler is the only writer of batch statuses, so seeing this
    /// error means a scheduler bug, not bad client input.
    #[snafu(display("invalid batch status transition: {from} -> {to}"))]
    InvalidTransition { from: BatchStatus, to: BatchStatus },
    /// Downstream batch processor failure.
    #[snafu(display("batch processing failed: {message}"))]
    Processing { message: String },
}

pub type Result<T, E = CoreError> = std::result::Result<T, E>;

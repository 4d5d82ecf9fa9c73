//! In-memory status store.
//!
//! All ingestion state lives in memory behind a `RwLock`. Readers receive
//! cloned snapshots and never observe a half-applied transition.

use std::collections::HashMap;
use std::time::SystemTime;

use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{CoreError, Result};
use crate::types::{Batch, BatchId, BatchStatus, Ingestion, IngestionId, Priority, RecordId};

#[derive(Debug, Default)]
struct IngestionStoreState {
    /// Map of ingestion id to the canonical ingestion record.
    ingestions: HashMap<IngestionId, Ingestion>,
}

/// Store of all ingestions and their batch statuses.
///
/// Shared between the request handlers (create on submit, read on status
/// queries) and the scheduler (status transitions).
#[derive(Debug, Default)]
pub struct IngestionStore {
    state: RwLock<IngestionStoreState>,
}

impl IngestionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically register a new ingestion with every batch in `Pending`
    /// state.
    ///
    /// Returns a snapshot of the freshly created record; callers use it to
    /// enqueue the batches.
    pub async fn create_ingestion(
        &self,
        priority: Priority,
        batches: Vec<Vec<RecordId>>,
    ) -> Ingestion {
        let ingestion = Ingestion {
            id: IngestionId::new(),
            created_at: SystemTime::now(),
            priority,
            batches: batches
                .into_iter()
                .map(|records| Batch {
                    id: BatchId::new(),
                    records,
                    status: BatchStatus::Pending,
                })
                .collect(),
        };

        let snapshot = ingestion.clone();
        self.state
            .write()
            .await
            .ingestions
            .insert(ingestion.id, ingestion);

        snapshot
    }

    /// Snapshot of an ingestion and all of its batch statuses.
    pub async fn get_ingestion(&self, id: IngestionId) -> Result<Ingestion> {
        self.state
            .read()
            .await
            .ingestions
            .get(&id)
            .cloned()
            .ok_or(CoreError::IngestionNotFound { id })
    }

    /// The record identifiers of a single batch.
    pub async fn batch_records(
        &self,
        ingestion_id: IngestionId,
        batch_id: BatchId,
    ) -> Result<Vec<RecordId>> {
        let state = self.state.read().await;
        let ingestion = state
            .ingestions
            .get(&ingestion_id)
            .ok_or(CoreError::IngestionNotFound { id: ingestion_id })?;

        ingestion
            .batches
            .iter()
            .find(|batch| batch.id == batch_id)
            .map(|batch| batch.records.clone())
            .ok_or(CoreError::BatchNotFound { id: batch_id })
    }

    /// Apply a forward-only status transition to exactly one batch.
    pub async fn update_batch_status(
        &self,
        ingestion_id: IngestionId,
        batch_id: BatchId,
        next: BatchStatus,
    ) -> Result<()> {
        let mut state = self.state.write().await;
        let ingestion = state
            .ingestions
            .get_mut(&ingestion_id)
            .ok_or(CoreError::IngestionNotFound { id: ingestion_id })?;

        let batch = ingestion
            .batches
            .iter_mut()
            .find(|batch| batch.id == batch_id)
            .ok_or(CoreError::BatchNotFound { id: batch_id })?;

        if !batch.status.can_transition_to(next) {
            return Err(CoreError::InvalidTransition {
                from: batch.status,
                to: next,
            });
        }

        debug!(
            %ingestion_id,
            %batch_id,
            from = %batch.status,
            to = %next,
            "batch status updated"
        );
        batch.status = next;

        Ok(())
    }
}

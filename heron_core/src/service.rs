//! Ingestion service, the composition root over splitter, store and queue.

use std::sync::Arc;

use tracing::info;

use crate::error::Result;
use crate::queue::BatchQueue;
use crate::splitter::split_records;
use crate::store::IngestionStore;
use crate::types::{Ingestion, IngestionId, Priority, RecordId};

/// Ingestion tuning knobs.
#[derive(Clone, Copy, Debug)]
pub struct IngestionOptions {
    /// Maximum number of records per batch.
    pub batch_size: usize,
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self { batch_size: 3 }
    }
}

/// Accepts ingestion submissions and exposes status reads.
///
/// Submitting registers the ingestion and enqueues its batches; it never
/// blocks on batch processing. The scheduler task is started separately at
/// process initialization, exactly once.
#[derive(Clone)]
pub struct IngestionService {
    store: Arc<IngestionStore>,
    queue: Arc<BatchQueue>,
    options: IngestionOptions,
}

impl IngestionService {
    pub fn new(
        store: Arc<IngestionStore>,
        queue: Arc<BatchQueue>,
        options: IngestionOptions,
    ) -> Self {
        Self {
            store,
            queue,
            options,
        }
    }

    /// Register a new ingestion and enqueue all of its batches.
    pub async fn submit(&self, records: Vec<RecordId>, priority: Priority) -> IngestionId {
        let batches = split_records(&records, self.options.batch_size);
        let ingestion = self.store.create_ingestion(priority, batches).await;

        for batch in &ingestion.batches {
            // All batches of one ingestion share its creation timestamp as
            // the submission timestamp; the queue's sequence number keeps
            // them in submission order.
            self.queue
                .enqueue(priority, ingestion.created_at, ingestion.id, batch.id)
                .await;
        }

        info!(
            ingestion_id = %ingestion.id,
            priority = %priority,
            records = records.len(),
            batches = ingestion.batches.len(),
            "ingestion accepted"
        );

        ingestion.id
    }

    /// Snapshot of an ingestion, or `IngestionNotFound`.
    pub async fn status(&self, id: IngestionId) -> Result<Ingestion> {
        self.store.get_ingestion(id).await
    }
}

//! Single-worker batch scheduler.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::error::Result;
use crate::processor::BatchProcessor;
use crate::queue::{BatchQueue, QueueEntry};
use crate::store::IngestionStore;
use crate::types::BatchStatus;

/// Scheduler tuning knobs.
#[derive(Clone, Copy, Debug)]
pub struct SchedulerOptions {
    /// Minimum spacing between the completion of one batch and the start of
    /// the next.
    pub throttle_interval: Duration,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self {
            throttle_interval: Duration::from_secs(5),
        }
    }
}

/// The batch scheduler.
///
/// Exactly one scheduler task runs per process. It repeatedly takes the
/// highest-priority pending batch, drives its status through
/// `pending -> triggered -> completed` (or `failed`) and enforces the
/// configured spacing between consecutive batches. At most one batch is in
/// the `triggered` state at any instant.
pub struct BatchScheduler<P> {
    queue: Arc<BatchQueue>,
    store: Arc<IngestionStore>,
    processor: Arc<P>,
    options: SchedulerOptions,
}

/// Run the scheduler until the token is cancelled.
pub async fn run_background_scheduler<P>(
    scheduler: BatchScheduler<P>,
    ct: CancellationToken,
) -> Result<()>
where
    P: BatchProcessor,
{
    scheduler.run(ct).await
}

impl<P> BatchScheduler<P>
where
    P: BatchProcessor,
{
    pub fn new(
        queue: Arc<BatchQueue>,
        store: Arc<IngestionStore>,
        processor: Arc<P>,
        options: SchedulerOptions,
    ) -> Self {
        Self {
            queue,
            store,
            processor,
            options,
        }
    }

    async fn run(self, ct: CancellationToken) -> Result<()> {
        let _ct_guard = ct.child_token().drop_guard();
        let mut next_start: Option<Instant> = None;

        loop {
            tokio::select! {
                _ = ct.cancelled() => break,
                _ = self.queue.ready() => {}
            }

            // Wait out the spacing before committing to a pop so that a
            // higher-priority batch arriving during the wait still wins.
            if let Some(next_start) = next_start {
                tokio::select! {
                    _ = ct.cancelled() => break,
                    _ = time::sleep_until(next_start) => {}
                }
            }

            let Some(entry) = self.queue.try_dequeue().await else {
                continue;
            };

            if let Err(err) = self.process_entry(&entry).await {
                // A store-side failure here means an internal bug. The loop
                // must survive it; the entry is skipped.
                error!(
                    ingestion_id = %entry.ingestion_id,
                    batch_id = %entry.batch_id,
                    error = %err,
                    "batch processing cycle failed, skipping entry"
                );
            }

            next_start = Some(Instant::now() + self.options.throttle_interval);
        }

        info!("batch scheduler stopped");
        Ok(())
    }

    async fn process_entry(&self, entry: &QueueEntry) -> Result<()> {
        let records = self
            .store
            .batch_records(entry.ingestion_id, entry.batch_id)
            .await?;

        self.store
            .update_batch_status(entry.ingestion_id, entry.batch_id, BatchStatus::Triggered)
            .await?;

        let queued = self.queue.len().await;
        info!(
            ingestion_id = %entry.ingestion_id,
            batch_id = %entry.batch_id,
            priority = %entry.priority,
            records = records.len(),
            queued,
            "batch triggered"
        );

        match self.processor.process(&records).await {
            Ok(()) => {
                self.store
                    .update_batch_status(
                        entry.ingestion_id,
                        entry.batch_id,
                        BatchStatus::Completed,
                    )
                    .await?;
                info!(
                    ingestion_id = %entry.ingestion_id,
                    batch_id = %entry.batch_id,
                    "batch completed"
                );
            }
            Err(err) => {
                // One bad batch never stalls or kills the loop.
                warn!(
                    ingestion_id = %entry.ingestion_id,
                    batch_id = %entry.batch_id,
                    error = %err,
                    "batch processor failed"
                );
                self.store
                    .update_batch_status(entry.ingestion_id, entry.batch_id, BatchStatus::Failed)
                    .await?;
            }
        }

        Ok(())
    }
}

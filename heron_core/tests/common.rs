use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use heron_core::{
    BatchProcessor, BatchQueue, BatchScheduler, CoreError, IngestionOptions, IngestionService,
    IngestionStore, RecordId, Result, SchedulerOptions, SimulatedProcessor,
    run_background_scheduler,
};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

pub const THROTTLE_INTERVAL: Duration = Duration::from_secs(5);
pub const PROCESSING_DELAY: Duration = Duration::from_secs(2);

pub fn create_scheduler() -> (
    JoinHandle<()>,
    Arc<IngestionService>,
    CancellationToken,
) {
    create_scheduler_with(Arc::new(SimulatedProcessor::new(PROCESSING_DELAY)))
}

pub fn create_scheduler_with<P: BatchProcessor>(
    processor: Arc<P>,
) -> (
    JoinHandle<()>,
    Arc<IngestionService>,
    CancellationToken,
) {
    let store = Arc::new(IngestionStore::new());
    let queue = Arc::new(BatchQueue::new());

    let scheduler = BatchScheduler::new(
        queue.clone(),
        store.clone(),
        processor,
        SchedulerOptions {
            throttle_interval: THROTTLE_INTERVAL,
        },
    );

    let service = Arc::new(IngestionService::new(
        store,
        queue,
        IngestionOptions::default(),
    ));

    let ct = CancellationToken::new();
    let task = tokio::spawn({
        let ct = ct.clone();
        async move {
            run_background_scheduler(scheduler, ct)
                .await
                .expect("scheduler run");
        }
    });

    (task, service, ct)
}

/// Processor that records the instant each batch starts processing.
#[derive(Debug, Default)]
pub struct RecordingProcessor {
    pub starts: Mutex<Vec<Instant>>,
}

#[async_trait]
impl BatchProcessor for RecordingProcessor {
    async fn process(&self, _records: &[RecordId]) -> Result<()> {
        self.starts.lock().await.push(Instant::now());
        tokio::time::sleep(PROCESSING_DELAY).await;
        Ok(())
    }
}

/// Processor that always fails, immediately.
#[derive(Debug, Default)]
pub struct FailingProcessor;

#[async_trait]
impl BatchProcessor for FailingProcessor {
    async fn process(&self, _records: &[RecordId]) -> Result<()> {
        Err(CoreError::Processing {
            message: "downstream unavailable".to_string(),
        })
    }
}

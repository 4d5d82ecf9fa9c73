//! The downstream batch processing collaborator.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::RecordId;

/// A downstream capability invoked once per batch.
///
/// Implementations may call any external system; the scheduler only cares
/// about success or failure and holds no lock while this runs.
#[async_trait]
pub trait BatchProcessor: Send + Sync + 'static {
    async fn process(&self, records: &[RecordId]) -> Result<()>;
}

/// Processor that models downstream work as a fixed delay and never fails.
#[derive(Clone, Debug)]
pub struct SimulatedProcessor {
    delay: Duration,
}

impl SimulatedProcessor {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl BatchProcessor for SimulatedProcessor {
    async fn process(&self, records: &[RecordId]) -> Result<()> {
        tracing::debug!(records = records.len(), "simulating downstream call");
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

//! Core batch ingestion engine.
//!
//! Heron accepts bulk record-identifier submissions, splits them into
//! fixed-size batches and processes the batches one at a time, in priority
//! order, with a minimum spacing between consecutive batches.
//!
//! ## Data flow
//!
//! **Service**: record ids -> [`splitter`] -> [`IngestionStore`] (create) +
//! [`BatchQueue`] (enqueue).
//!
//! **Scheduler**: [`BatchQueue`] -> [`BatchProcessor`] -> [`IngestionStore`]
//! (status transitions).
//!
//! Clients poll the store through [`IngestionService::status`].

pub mod error;
pub mod processor;
pub mod queue;
pub mod scheduler;
pub mod service;
pub mod splitter;
pub mod store;
pub mod types;

pub use error::{CoreError, Result};
pub use processor::{BatchProcessor, SimulatedProcessor};
pub use queue::{BatchQueue, QueueEntry};
pub use scheduler::{BatchScheduler, SchedulerOptions, run_background_scheduler};
pub use service::{IngestionOptions, IngestionService};
pub use splitter::split_records;
pub use store::IngestionStore;
pub use types::{
    Batch, BatchId, BatchStatus, Ingestion, IngestionId, IngestionStatus, Priority, RecordId,
};

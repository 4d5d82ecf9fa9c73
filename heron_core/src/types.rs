//! Types shared across the ingestion engine.

use std::fmt::{self, Display};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A client-supplied record identifier.
pub type RecordId = i64;

/// Unique identifier of an ingestion.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngestionId(pub Uuid);

impl IngestionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(value: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(value).map(Self)
    }
}

impl Default for IngestionId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for IngestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier of a batch.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(pub Uuid);

impl BatchId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Priority class of an ingestion.
///
/// The `Ord` implementation sorts the most urgent class first, so it can be
/// used directly as the leading queue ordering key.
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Numeric rank, ascending by urgency: HIGH=0, MEDIUM=1, LOW=2.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a single batch.
///
/// Transitions are forward-only: `Pending -> Triggered`, then `Triggered ->
/// Completed` or `Triggered -> Failed`. Anything else is rejected by the
/// store.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    Pending,
    Triggered,
    Completed,
    Failed,
}

impl BatchStatus {
    pub fn can_transition_to(self, next: BatchStatus) -> bool {
        matches!(
            (self, next),
            (BatchStatus::Pending, BatchStatus::Triggered)
                | (BatchStatus::Triggered, BatchStatus::Completed)
                | (BatchStatus::Triggered, BatchStatus::Failed)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BatchStatus::Pending => "pending",
            BatchStatus::Triggered => "triggered",
            BatchStatus::Completed => "completed",
            BatchStatus::Failed => "failed",
        }
    }
}

impl Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall status of an ingestion, derived from its batch statuses at read
/// time and never stored.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestionStatus {
    YetToStart,
    Triggered,
    Failed,
    Completed,
}

impl IngestionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IngestionStatus::YetToStart => "yet_to_start",
            IngestionStatus::Triggered => "triggered",
            IngestionStatus::Failed => "failed",
            IngestionStatus::Completed => "completed",
        }
    }
}

impl Display for IngestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bounded-size chunk of record identifiers processed as one scheduling
/// unit. Belongs to exactly one ingestion.
#[derive(Clone, Debug)]
pub struct Batch {
    /// Unique batch identifier, the lookup key used by queue entries.
    pub id: BatchId,
    /// The record identifiers in this batch, in submission order.
    pub records: Vec<RecordId>,
    /// Current processing status.
    pub status: BatchStatus,
}

/// One client-submitted ingestion and the batches derived from it.
///
/// Owned by the [`crate::IngestionStore`]; created atomically with all of
/// its batches and never deleted.
#[derive(Clone, Debug)]
pub struct Ingestion {
    pub id: IngestionId,
    /// Creation time, shared by all batches as their submission timestamp.
    pub created_at: SystemTime,
    pub priority: Priority,
    pub batches: Vec<Batch>,
}

impl Ingestion {
    /// Derive the overall status.
    ///
    /// A single triggered batch marks the whole ingestion `triggered`, even
    /// when siblings are still pending. Pending outranks failed; an
    /// ingestion with zero batches is `completed`.
    pub fn overall_status(&self) -> IngestionStatus {
        let mut overall = IngestionStatus::Completed;
        for batch in &self.batches {
            match batch.status {
                BatchStatus::Triggered => return IngestionStatus::Triggered,
                BatchStatus::Pending => overall = IngestionStatus::YetToStart,
                BatchStatus::Failed if overall == IngestionStatus::Completed => {
                    overall = IngestionStatus::Failed;
                }
                _ => {}
            }
        }
        overall
    }
}

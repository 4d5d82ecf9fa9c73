//! Priority queue of pending batches.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::SystemTime;

use tokio::sync::{Mutex, Notify};

use crate::types::{BatchId, IngestionId, Priority};

/// A single scheduling entry.
///
/// Entries carry the batch identifier as the lookup key back into the
/// status store; the store remains the single source of truth for batch
/// state.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QueueEntry {
    pub priority: Priority,
    /// Submission timestamp, shared by all batches of one ingestion.
    pub submitted_at: SystemTime,
    /// Queue-assigned insertion sequence number.
    pub seq: u64,
    pub ingestion_id: IngestionId,
    pub batch_id: BatchId,
}

impl QueueEntry {
    /// Strict total order: priority rank, then submission timestamp, then
    /// insertion sequence. `seq` is unique per queue, so no two distinct
    /// entries compare equal and dequeue order is deterministic even for
    /// equal-priority equal-timestamp submissions.
    fn sort_key(&self) -> (u8, SystemTime, u64) {
        (self.priority.rank(), self.submitted_at, self.seq)
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Default)]
struct QueueState {
    heap: BinaryHeap<Reverse<QueueEntry>>,
    next_seq: u64,
}

/// Priority queue shared between request handlers (producers) and the
/// scheduler loop (single consumer).
///
/// Producers signal the scheduler through a [`Notify`] instead of the
/// scheduler sleep-polling for work.
#[derive(Debug, Default)]
pub struct BatchQueue {
    state: Mutex<QueueState>,
    notify: Notify,
}

impl BatchQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry and wake the scheduler if it is waiting.
    pub async fn enqueue(
        &self,
        priority: Priority,
        submitted_at: SystemTime,
        ingestion_id: IngestionId,
        batch_id: BatchId,
    ) {
        let mut state = self.state.lock().await;
        let seq = state.next_seq;
        state.next_seq += 1;
        state.heap.push(Reverse(QueueEntry {
            priority,
            submitted_at,
            seq,
            ingestion_id,
            batch_id,
        }));
        drop(state);

        self.notify.notify_one();
    }

    /// Remove and return the highest-priority entry, if any. Never blocks.
    pub async fn try_dequeue(&self) -> Option<QueueEntry> {
        let mut state = self.state.lock().await;
        state.heap.pop().map(|Reverse(entry)| entry)
    }

    /// Wait until the queue is non-empty, without removing anything.
    ///
    /// Lets the scheduler enforce the throttle interval before committing
    /// to a pop, so a higher-priority batch arriving during the wait still
    /// overtakes.
    pub async fn ready(&self) {
        loop {
            let notified = self.notify.notified();
            if !self.state.lock().await.heap.is_empty() {
                return;
            }
            notified.await;
        }
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.heap.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.heap.is_empty()
    }
}

//! Splitting of record identifier lists into fixed-size batches.

use crate::types::RecordId;

/// Partition `records` into chunks of at most `batch_size`, preserving
/// order.
///
/// Every chunk is non-empty and the concatenation of the chunks is exactly
/// the input. An empty input yields no chunks; an ingestion with zero
/// batches is valid and immediately complete.
pub fn split_records(records: &[RecordId], batch_size: usize) -> Vec<Vec<RecordId>> {
    let batch_size = batch_size.max(1);
    records.chunks(batch_size).map(<[RecordId]>::to_vec).collect()
}

//! In-memory record store.

use chrono::Utc;
use rust_decimal::Decimal;

use crate::cache::{CacheState, DecodedCache};
use crate::constants::MAX_RELATIVE_MS;
use crate::decoder::decode_all;
use crate::encoder::encode;
use crate::error::AppendError;
use crate::item::StoredItem;
use crate::packed::PackedRecord;
use crate::processor::Processor;
use crate::summary::{summarize, PaymentsSummary};

/// Append-only ledger of payment events, one `u64` per record.
///
/// Timestamps are stored relative to the store's creation instant (its epoch),
/// which is fixed for the lifetime of the store and survives `clear`.
///
/// Not internally synchronized: share it across threads behind a lock.
#[derive(Debug, Clone)]
pub struct RecordStore {
    epoch_ms: i64,
    records: Vec<PackedRecord>,
    cache: DecodedCache,
    version: u64,
}

impl RecordStore {
    /// Create an empty store whose epoch is the current time
    #[must_use]
    pub fn new() -> Self {
        Self::with_epoch(Utc::now().timestamp_millis())
    }

    /// Create an empty store with an explicit epoch (Unix milliseconds)
    #[must_use]
    pub fn with_epoch(epoch_ms: i64) -> Self {
        Self {
            epoch_ms,
            records: Vec::new(),
            cache: DecodedCache::default(),
            version: 0,
        }
    }

    /// Append a payment event
    ///
    /// # Arguments
    /// * `timestamp_ms` - Unix timestamp in milliseconds
    /// * `amount` - Non-negative amount, rounded half-up to cents
    /// * `processor` - Path that handled the payment
    ///
    /// # Errors
    /// Returns an error, leaving the store unchanged, if:
    /// - The amount is negative
    /// - The rounded amount exceeds 20.47
    /// - The timestamp is before the epoch or more than `MAX_RELATIVE_MS` after it
    pub fn append(
        &mut self,
        timestamp_ms: i64,
        amount: Decimal,
        processor: Processor,
    ) -> Result<(), AppendError> {
        let record = encode(self.epoch_ms, timestamp_ms, amount, processor).inspect_err(|e| {
            tracing::debug!(timestamp_ms, %amount, %processor, error = %e, "rejected record");
        })?;
        self.records.push(record);
        self.touch();
        Ok(())
    }

    /// Append a payment event handled by the default processor
    ///
    /// # Errors
    /// Same as `append`.
    #[inline]
    pub fn add(&mut self, timestamp_ms: i64, amount: Decimal) -> Result<(), AppendError> {
        self.append(timestamp_ms, amount, Processor::Default)
    }

    /// All records in insertion order
    ///
    /// Decodes on the first call after a mutation; later calls return the same
    /// memoized view.
    #[must_use]
    pub fn read_all(&self) -> &[StoredItem] {
        self.cache.get_or_decode(|| {
            tracing::trace!(count = self.records.len(), "decoding records");
            decode_all(self.epoch_ms, &self.records)
        })
    }

    /// Remove every record. The epoch is kept.
    pub fn clear(&mut self) {
        tracing::debug!(count = self.records.len(), "clearing store");
        self.records.clear();
        self.touch();
    }

    /// Per-processor totals over records with `from <= timestamp <= to`
    #[must_use]
    pub fn summary(&self, from: Option<i64>, to: Option<i64>) -> PaymentsSummary {
        summarize(self.read_all(), from, to)
    }

    /// Store creation instant (Unix milliseconds)
    #[inline]
    #[must_use]
    pub const fn epoch(&self) -> i64 {
        self.epoch_ms
    }

    /// Latest timestamp the store can accept
    #[inline]
    #[must_use]
    pub const fn max_timestamp(&self) -> i64 {
        self.epoch_ms.saturating_add(MAX_RELATIVE_MS as i64)
    }

    /// Number of records
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Mutation counter, bumped by every successful append and every clear
    #[inline]
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Whether the next `read_all` will decode
    #[inline]
    #[must_use]
    pub fn cache_state(&self) -> CacheState {
        self.cache.state()
    }

    /// The packed sequence backing the store
    #[inline]
    #[must_use]
    pub fn packed(&self) -> &[PackedRecord] {
        &self.records
    }

    fn touch(&mut self) {
        self.cache.invalidate();
        self.version += 1;
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

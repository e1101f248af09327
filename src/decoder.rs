//! Decoding of packed records back into ledger items.

use rust_decimal::Decimal;

use crate::constants::unpack_fields;
use crate::item::StoredItem;
use crate::packed::PackedRecord;
use crate::processor::Processor;

/// Decode a single packed record
///
/// Exact inverse of `encoder::encode` for the same epoch; never fails.
#[inline]
#[must_use]
pub fn decode(epoch_ms: i64, record: PackedRecord) -> StoredItem {
    let (cents, fallback, relative_ms) = unpack_fields(record.raw());
    StoredItem {
        timestamp: epoch_ms + i64::from(relative_ms),
        value: Decimal::new(i64::from(cents), 2),
        processor: Processor::from_bit(fallback),
    }
}

/// Decode a sequence of packed records, preserving order
#[must_use = "decoding returns items that should be used"]
pub fn decode_all(epoch_ms: i64, records: &[PackedRecord]) -> Vec<StoredItem> {
    records.iter().map(|&r| decode(epoch_ms, r)).collect()
}

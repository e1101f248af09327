//! `paypack` - Bit-packed in-memory ledger of payment events
//!
//! Every record (timestamp, amount, processor tag) is compressed into a single `u64`
//! instead of a multi-field struct. The price is a bounded value range: amounts up to
//! 20.47 and timestamps up to ~34.9 minutes after the store was created. Inputs outside
//! that range are rejected, never truncated.
//!
//! # Example
//! ```
//! use paypack::{Processor, RecordStore};
//! use rust_decimal::Decimal;
//!
//! let mut store = RecordStore::new();
//! let now = store.epoch();
//!
//! store.append(now, Decimal::new(1990, 2), Processor::Default).unwrap();
//! store.append(now + 1_500, Decimal::new(1005, 3), Processor::Fallback).unwrap(); // 1.005 -> 1.01
//!
//! let items = store.read_all();
//! assert_eq!(items.len(), 2);
//! assert_eq!(items[1].value, Decimal::new(101, 2));
//!
//! // 20.48 does not fit in 11 bits of cents
//! assert!(store.add(now, Decimal::new(2048, 2)).is_err());
//! ```
//!
//! # Record Layout
//!
//! | Bits | Width | Field | Description |
//! |------|-------|-------|-------------|
//! | 0-10 | 11 | `cents` | Amount rounded half-up to cents, 0..=2047 (0.00 - 20.47) |
//! | 11 | 1 | `processor` | 0 = `default`, 1 = `fallback` |
//! | 12-32 | 21 | `relative_ts` | Milliseconds since the store epoch, 0..=2,097,151 |
//!
//! The layout needs 33 bits, so records are stored as `u64` words.
//!
//! # Decoded View
//!
//! `RecordStore::read_all` decodes the whole sequence once and memoizes the result.
//! The view stays valid (`CacheState::Fresh`) until the next `append` or `clear`, both
//! of which need `&mut self` and therefore cannot run while a view is borrowed.
//!
//! # Supported Ranges
//! - Amounts: 0.00 to 20.47, negative amounts rejected
//! - Timestamps: epoch to epoch + 2,097,151 ms
//! - Records per store: bounded only by memory (8 bytes each)

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]

mod cache;
mod constants;
pub mod decoder;
pub mod encoder;
mod error;
mod item;
mod packed;
mod processor;
mod store;
pub mod summary;

#[cfg(test)]
mod tests;

// Re-export public API
pub use cache::CacheState;
pub use constants::{MAX_CENTS, MAX_RELATIVE_MS};
pub use error::{AppendError, ParseProcessorError};
pub use item::StoredItem;
pub use packed::PackedRecord;
pub use processor::Processor;
pub use store::RecordStore;
pub use summary::{PaymentsSummary, ProcessorTotals};

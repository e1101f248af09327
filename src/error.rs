//! Error types for paypack operations.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::constants::{max_span_minutes, MAX_CENTS, MAX_RELATIVE_MS};

/// Error returned when a record cannot be appended.
///
/// Appends are all-or-nothing: on any of these the store is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppendError {
    /// Rounded amount does not fit in the 11-bit cents field
    #[error("amount too large: maximum {max} (got {amount})")]
    AmountOutOfRange { max: Decimal, amount: Decimal },
    /// Amount is below zero
    #[error("amount must not be negative (got {amount})")]
    NegativeAmount { amount: Decimal },
    /// Timestamp falls before the store epoch or past the 21-bit window
    #[error(
        "timestamp out of range: maximum {max_ms}ms (~{minutes:.1} min) after store creation (timestamp {timestamp}, epoch {epoch})",
        minutes = max_span_minutes()
    )]
    TimestampOutOfRange { timestamp: i64, epoch: i64, max_ms: u32 },
}

impl AppendError {
    pub(crate) fn amount_out_of_range(amount: Decimal) -> Self {
        Self::AmountOutOfRange {
            max: Decimal::new(i64::from(MAX_CENTS), 2),
            amount,
        }
    }

    pub(crate) fn timestamp_out_of_range(timestamp: i64, epoch: i64) -> Self {
        Self::TimestampOutOfRange {
            timestamp,
            epoch,
            max_ms: MAX_RELATIVE_MS,
        }
    }

    /// True when a timestamp was rejected for predating the store epoch
    #[must_use]
    pub fn is_before_epoch(&self) -> bool {
        matches!(self, Self::TimestampOutOfRange { timestamp, epoch, .. } if timestamp < epoch)
    }
}

/// Error returned when parsing a processor tag from text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid processor tag {tag:?}: expected \"default\" or \"fallback\"")]
pub struct ParseProcessorError {
    pub tag: String,
}

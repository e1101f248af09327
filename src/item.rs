//! Decoded ledger record.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::processor::Processor;

/// A decoded payment event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredItem {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Amount with cent precision
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    /// Path that processed the payment
    pub processor: Processor,
}

impl StoredItem {
    /// Timestamp as a UTC date-time
    #[must_use]
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

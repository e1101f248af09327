//! Single-word representation of a ledger record.

use serde::{Deserialize, Serialize};

use crate::constants::unpack_fields;
use crate::processor::Processor;

/// One record packed into the low 33 bits of a `u64`.
///
/// The word is only ever built by `encoder::encode`, so every field is known to be in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackedRecord(u64);

impl PackedRecord {
    #[inline]
    pub(crate) const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The packed word
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Amount in cents (bits 0-10)
    #[inline]
    #[must_use]
    pub fn cents(self) -> u16 {
        unpack_fields(self.0).0
    }

    /// Processor tag (bit 11)
    #[inline]
    #[must_use]
    pub fn processor(self) -> Processor {
        Processor::from_bit(unpack_fields(self.0).1)
    }

    /// Milliseconds since the store epoch (bits 12-32)
    #[inline]
    #[must_use]
    pub fn relative_ms(self) -> u32 {
        unpack_fields(self.0).2
    }
}

//! Bit layout of a packed record and the helpers that move fields in and out of it.

/// Width of the cents field (bits 0-10)
pub(crate) const AMOUNT_BITS: u32 = 11;

/// Width of the relative timestamp field (bits 12-32)
pub(crate) const TIMESTAMP_BITS: u32 = 21;

/// Bit position of the processor flag
pub(crate) const PROCESSOR_SHIFT: u32 = AMOUNT_BITS;

/// Bit position of the relative timestamp
pub(crate) const TIMESTAMP_SHIFT: u32 = AMOUNT_BITS + 1;

pub(crate) const AMOUNT_MASK: u64 = (1 << AMOUNT_BITS) - 1;
pub(crate) const PROCESSOR_MASK: u64 = 0x1;
pub(crate) const TIMESTAMP_MASK: u64 = (1 << TIMESTAMP_BITS) - 1;

/// Largest storable amount in cents (20.47)
pub const MAX_CENTS: u16 = AMOUNT_MASK as u16;

/// Largest storable distance from the store epoch, in milliseconds (~34.9 minutes)
pub const MAX_RELATIVE_MS: u32 = TIMESTAMP_MASK as u32;

/// Pack the three fields into a single word
/// - Bits 0-10: cents (0-2047)
/// - Bit 11: processor flag (0 = default, 1 = fallback)
/// - Bits 12-32: milliseconds since the store epoch
///
/// Callers must range-check first; out-of-range bits are masked off.
#[inline]
pub(crate) fn pack_fields(cents: u16, fallback: bool, relative_ms: u32) -> u64 {
    ((u64::from(relative_ms) & TIMESTAMP_MASK) << TIMESTAMP_SHIFT)
        | (u64::from(fallback) << PROCESSOR_SHIFT)
        | (u64::from(cents) & AMOUNT_MASK)
}

/// Unpack a word produced by `pack_fields`
/// Returns (`cents`, `fallback`, `relative_ms`)
#[inline]
pub(crate) fn unpack_fields(packed: u64) -> (u16, bool, u32) {
    let cents = (packed & AMOUNT_MASK) as u16;
    let fallback = (packed >> PROCESSOR_SHIFT) & PROCESSOR_MASK == 1;
    let relative_ms = ((packed >> TIMESTAMP_SHIFT) & TIMESTAMP_MASK) as u32;
    (cents, fallback, relative_ms)
}

/// Maximum representable span expressed in minutes, for error messages
#[inline]
pub(crate) fn max_span_minutes() -> f64 {
    f64::from(MAX_RELATIVE_MS) / 60_000.0
}

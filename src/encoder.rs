//! Encoding of payment events into packed records.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{pack_fields, MAX_CENTS, MAX_RELATIVE_MS};
use crate::error::AppendError;
use crate::packed::PackedRecord;
use crate::processor::Processor;

/// Round an amount to whole cents
///
/// Rounds half-up (1.005 -> 101 cents).
///
/// # Errors
/// - `NegativeAmount` if `amount < 0`
/// - `AmountOutOfRange` if the rounded amount exceeds 20.47
pub fn amount_to_cents(amount: Decimal) -> Result<u16, AppendError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(AppendError::NegativeAmount { amount });
    }

    // abs() folds negative zero into zero
    let cents = amount
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|c| c.to_u64())
        .ok_or_else(|| AppendError::amount_out_of_range(amount))?;

    if cents > u64::from(MAX_CENTS) {
        return Err(AppendError::amount_out_of_range(amount));
    }
    Ok(cents as u16)
}

/// Offset of `timestamp_ms` from `epoch_ms`, if it fits the 21-bit window
///
/// # Errors
/// `TimestampOutOfRange` if the timestamp predates the epoch or lies more than
/// `MAX_RELATIVE_MS` after it.
pub fn relative_timestamp(epoch_ms: i64, timestamp_ms: i64) -> Result<u32, AppendError> {
    timestamp_ms
        .checked_sub(epoch_ms)
        .and_then(|rel| u32::try_from(rel).ok())
        .filter(|&rel| rel <= MAX_RELATIVE_MS)
        .ok_or_else(|| AppendError::timestamp_out_of_range(timestamp_ms, epoch_ms))
}

/// Pack a payment event relative to `epoch_ms`
///
/// The amount is validated before the timestamp.
///
/// # Errors
/// See `amount_to_cents` and `relative_timestamp`.
#[inline]
pub fn encode(
    epoch_ms: i64,
    timestamp_ms: i64,
    amount: Decimal,
    processor: Processor,
) -> Result<PackedRecord, AppendError> {
    let cents = amount_to_cents(amount)?;
    let relative_ms = relative_timestamp(epoch_ms, timestamp_ms)?;
    Ok(PackedRecord::from_raw(pack_fields(
        cents,
        processor.is_fallback(),
        relative_ms,
    )))
}

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::constants::{pack_fields, unpack_fields};
use crate::decoder::decode;
use crate::encoder::{amount_to_cents, encode};
use crate::{AppendError, CacheState, PackedRecord, Processor, RecordStore, StoredItem};
use crate::{MAX_CENTS, MAX_RELATIVE_MS};

const EPOCH: i64 = 1_761_955_455_000;

fn amount(s: &str) -> Decimal {
    Decimal::from_str_exact(s).unwrap()
}

/// ============================================================================
/// RECORD SIZE GUARD
/// ============================================================================
/// A packed record is a single u64 word. Growing it defeats the purpose of the store.
/// ============================================================================
#[test]
fn test_packed_record_size_guard() {
    use std::mem::size_of;

    assert_eq!(size_of::<PackedRecord>(), 8, "PackedRecord must stay a single u64 word");
}

#[test]
fn test_layout_constants() {
    assert_eq!(MAX_CENTS, 2047);
    assert_eq!(MAX_RELATIVE_MS, 2_097_151);
}

#[test]
fn test_pack_fields_bit_positions() {
    assert_eq!(pack_fields(1, false, 0), 0b1_u64);
    assert_eq!(pack_fields(0, true, 0), 1_u64 << 11);
    assert_eq!(pack_fields(0, false, 1), 1_u64 << 12);
    assert_eq!(pack_fields(2047, true, 2_097_151), (1_u64 << 33) - 1);
    assert_eq!(unpack_fields((1_u64 << 33) - 1), (2047, true, 2_097_151));
}

#[test]
fn test_packed_word_uses_33rd_bit() {
    let record = encode(EPOCH, EPOCH + i64::from(MAX_RELATIVE_MS), Decimal::ZERO, Processor::Default).unwrap();
    assert!(record.raw() > u64::from(u32::MAX));
    assert_eq!(record.relative_ms(), MAX_RELATIVE_MS);
}

#[test]
fn test_encode_decode_fields() {
    let record = encode(EPOCH, EPOCH + 1234, amount("19.90"), Processor::Fallback).unwrap();
    assert_eq!(record.cents(), 1990);
    assert_eq!(record.processor(), Processor::Fallback);
    assert_eq!(record.relative_ms(), 1234);
    assert_eq!(record.raw(), (1234_u64 << 12) | (1 << 11) | 1990);

    let item = decode(EPOCH, record);
    assert_eq!(
        item,
        StoredItem {
            timestamp: EPOCH + 1234,
            value: amount("19.90"),
            processor: Processor::Fallback,
        }
    );
}

#[test]
fn test_amount_upper_boundary() {
    let mut store = RecordStore::with_epoch(EPOCH);
    store.append(EPOCH, amount("20.47"), Processor::Default).unwrap();
    let err = store.append(EPOCH, amount("20.48"), Processor::Default).unwrap_err();
    assert_eq!(
        err,
        AppendError::AmountOutOfRange {
            max: amount("20.47"),
            amount: amount("20.48"),
        }
    );
    assert_eq!(store.len(), 1);
}

#[test]
fn test_amount_error_message_reports_max_and_input() {
    let err = amount_to_cents(amount("25")).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("20.47"), "{msg}");
    assert!(msg.contains("25"), "{msg}");
}

#[test]
fn test_amount_rounding_half_up() {
    assert_eq!(amount_to_cents(amount("1.005")).unwrap(), 101);
    assert_eq!(amount_to_cents(amount("1.004")).unwrap(), 100);
    assert_eq!(amount_to_cents(amount("0.005")).unwrap(), 1);
    assert_eq!(amount_to_cents(amount("0.004")).unwrap(), 0);
    assert_eq!(amount_to_cents(amount("20.474")).unwrap(), 2047);
    assert!(amount_to_cents(amount("20.475")).is_err());

    let mut store = RecordStore::with_epoch(EPOCH);
    store.add(EPOCH, amount("1.005")).unwrap();
    assert_eq!(store.packed()[0].cents(), 101);
    assert_eq!(store.read_all()[0].value, amount("1.01"));
}

#[test]
fn test_zero_amount() {
    assert_eq!(amount_to_cents(Decimal::ZERO).unwrap(), 0);
    assert_eq!(amount_to_cents(amount("-0.00")).unwrap(), 0);
}

#[test]
fn test_negative_amount_rejected() {
    let mut store = RecordStore::with_epoch(EPOCH);
    let err = store.add(EPOCH, amount("-0.01")).unwrap_err();
    assert_eq!(err, AppendError::NegativeAmount { amount: amount("-0.01") });
    assert!(store.is_empty());
}

#[test]
fn test_huge_amount_does_not_panic() {
    assert!(matches!(
        amount_to_cents(Decimal::MAX),
        Err(AppendError::AmountOutOfRange { .. })
    ));
}

#[test]
fn test_timestamp_boundaries() {
    let mut store = RecordStore::with_epoch(EPOCH);
    store.add(EPOCH + 2_097_151, amount("1.00")).unwrap();
    assert_eq!(store.max_timestamp(), EPOCH + 2_097_151);

    let late = store.add(EPOCH + 2_097_152, amount("1.00")).unwrap_err();
    assert!(matches!(late, AppendError::TimestampOutOfRange { .. }));
    assert!(!late.is_before_epoch());

    let early = store.add(EPOCH - 1, amount("1.00")).unwrap_err();
    assert!(matches!(early, AppendError::TimestampOutOfRange { .. }));
    assert!(early.is_before_epoch());

    assert_eq!(store.len(), 1);
}

#[test]
fn test_timestamp_extremes_do_not_overflow() {
    let mut store = RecordStore::with_epoch(EPOCH);
    assert!(store.add(i64::MIN, amount("1.00")).is_err());
    assert!(store.add(i64::MAX, amount("1.00")).is_err());

    let mut negative_epoch = RecordStore::with_epoch(i64::MIN);
    assert!(negative_epoch.add(i64::MAX, amount("1.00")).is_err());
    negative_epoch.add(i64::MIN + 5, amount("1.00")).unwrap();
    assert_eq!(negative_epoch.read_all()[0].timestamp, i64::MIN + 5);
}

#[test]
fn test_timestamp_error_message_reports_range() {
    let err = RecordStore::with_epoch(EPOCH).add(EPOCH - 10, amount("1.00")).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("2097151ms"), "{msg}");
    assert!(msg.contains("min"), "{msg}");
}

#[test]
fn test_amount_checked_before_timestamp() {
    let err = encode(EPOCH, EPOCH - 1, amount("99"), Processor::Default).unwrap_err();
    assert!(matches!(err, AppendError::AmountOutOfRange { .. }));
}

#[test]
fn test_cache_invalidation() {
    let mut store = RecordStore::with_epoch(EPOCH);
    assert_eq!(store.cache_state(), CacheState::Stale);

    store.add(EPOCH + 1, amount("1.00")).unwrap();
    store.add(EPOCH + 2, amount("2.00")).unwrap();
    store.append(EPOCH + 3, amount("3.00"), Processor::Fallback).unwrap();

    let first = store.read_all().to_vec();
    assert_eq!(store.cache_state(), CacheState::Fresh);
    let second = store.read_all();
    assert_eq!(first.as_slice(), second);
    assert_eq!(second.len(), 3);

    store.add(EPOCH + 4, amount("4.00")).unwrap();
    assert_eq!(store.cache_state(), CacheState::Stale);
    let after_add = store.read_all();
    assert_eq!(after_add.len(), 4);
    assert_eq!(after_add[3].value, amount("4.00"));
    assert_eq!(after_add[3].timestamp, EPOCH + 4);

    store.clear();
    assert_eq!(store.cache_state(), CacheState::Stale);
    assert!(store.read_all().is_empty());
}

#[test]
fn test_warm_read_returns_same_view() {
    let mut store = RecordStore::with_epoch(EPOCH);
    store.add(EPOCH, amount("5.00")).unwrap();
    let a = store.read_all().as_ptr();
    let b = store.read_all().as_ptr();
    assert_eq!(a, b);
}

#[test]
fn test_failed_append_keeps_cache_and_version() {
    let mut store = RecordStore::with_epoch(EPOCH);
    store.add(EPOCH, amount("5.00")).unwrap();
    let _ = store.read_all();
    let version = store.version();

    assert!(store.add(EPOCH, amount("50.00")).is_err());
    assert!(store.add(EPOCH - 1, amount("5.00")).is_err());

    assert_eq!(store.version(), version);
    assert_eq!(store.cache_state(), CacheState::Fresh);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_version_bumps_on_mutation() {
    let mut store = RecordStore::with_epoch(EPOCH);
    assert_eq!(store.version(), 0);
    store.add(EPOCH, amount("1.00")).unwrap();
    store.add(EPOCH, amount("1.00")).unwrap();
    assert_eq!(store.version(), 2);
    let _ = store.read_all();
    assert_eq!(store.version(), 2);
    store.clear();
    assert_eq!(store.version(), 3);
}

#[test]
fn test_clear_keeps_epoch() {
    let mut store = RecordStore::with_epoch(EPOCH);
    store.add(EPOCH + 100, amount("1.00")).unwrap();
    store.clear();
    assert_eq!(store.epoch(), EPOCH);
    assert!(store.is_empty());

    store.add(EPOCH + 200, amount("2.00")).unwrap();
    assert_eq!(store.read_all()[0].timestamp, EPOCH + 200);
}

#[test]
fn test_insertion_order_not_chronological() {
    let mut store = RecordStore::with_epoch(EPOCH);
    let timestamps = [EPOCH + 900, EPOCH + 10, EPOCH + 500, EPOCH + 10, EPOCH];
    for (i, &ts) in timestamps.iter().enumerate() {
        store.add(ts, Decimal::new(i as i64, 2)).unwrap();
    }
    let items = store.read_all();
    for (i, item) in items.iter().enumerate() {
        assert_eq!(item.timestamp, timestamps[i]);
        assert_eq!(item.value, Decimal::new(i as i64, 2));
    }
}

#[test]
fn test_duplicates_are_kept() {
    let mut store = RecordStore::with_epoch(EPOCH);
    for _ in 0..3 {
        store.add(EPOCH + 7, amount("3.33")).unwrap();
    }
    assert_eq!(store.read_all().len(), 3);
}

#[test]
fn test_processor_tag_fidelity() {
    let mut store = RecordStore::with_epoch(EPOCH);
    let tags: Vec<Processor> = (0..200)
        .map(|i| if i % 3 == 0 || i % 7 == 0 { Processor::Fallback } else { Processor::Default })
        .collect();
    for (i, &tag) in tags.iter().enumerate() {
        store.append(EPOCH + i as i64, amount("0.50"), tag).unwrap();
    }
    let decoded: Vec<Processor> = store.read_all().iter().map(|i| i.processor).collect();
    assert_eq!(decoded, tags);
}

#[test]
fn test_processor_parse_and_display() {
    assert_eq!(Processor::from_str("default").unwrap(), Processor::Default);
    assert_eq!(Processor::from_str("fallback").unwrap(), Processor::Fallback);
    assert_eq!(Processor::Fallback.to_string(), "fallback");
    assert_eq!(Processor::default(), Processor::Default);

    let err = Processor::from_str("Fallback").unwrap_err();
    assert_eq!(err.tag, "Fallback");
    assert!(err.to_string().contains("\"Fallback\""));
}

#[test]
fn test_stored_item_json() {
    let item = StoredItem {
        timestamp: EPOCH,
        value: amount("19.90"),
        processor: Processor::Fallback,
    };
    let json = serde_json::to_value(item).unwrap();
    assert_eq!(json["timestamp"], EPOCH);
    assert_eq!(json["value"], 19.9);
    assert_eq!(json["processor"], "fallback");
}

#[test]
fn test_stored_item_datetime() {
    let item = StoredItem {
        timestamp: EPOCH,
        value: Decimal::ZERO,
        processor: Processor::Default,
    };
    assert_eq!(item.datetime().unwrap().timestamp_millis(), EPOCH);
}

#[test]
fn test_store_summary() {
    let mut store = RecordStore::with_epoch(EPOCH);
    store.add(EPOCH + 10, amount("19.90")).unwrap();
    store.append(EPOCH + 20, amount("19.90"), Processor::Fallback).unwrap();
    store.add(EPOCH + 30, amount("0.10")).unwrap();

    let all = store.summary(None, None);
    assert_eq!(all.default.total_requests, 2);
    assert_eq!(all.default.total_amount, amount("20.00"));
    assert_eq!(all.fallback.total_requests, 1);

    let window = store.summary(Some(EPOCH + 15), Some(EPOCH + 25));
    assert_eq!(window.default.total_requests, 0);
    assert_eq!(window.fallback.total_amount, amount("19.90"));
}

#[test]
fn test_new_store_epoch_is_now() {
    let before = chrono::Utc::now().timestamp_millis();
    let store = RecordStore::new();
    let after = chrono::Utc::now().timestamp_millis();
    assert!(store.epoch() >= before && store.epoch() <= after);
    assert!(store.is_empty());
}

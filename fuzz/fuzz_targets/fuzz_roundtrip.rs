#![no_main]

use libfuzzer_sys::fuzz_target;
use paypack::{Processor, RecordStore, MAX_CENTS, MAX_RELATIVE_MS};
use rust_decimal::Decimal;

const EPOCH: i64 = 1_761_955_455_000;

fuzz_target!(|data: &[u8]| {
    let mut store = RecordStore::with_epoch(EPOCH);
    let mut expected = Vec::new();

    // Each 6-byte chunk is (relative_ms: u32, cents+flag: u16), clamped into range
    for chunk in data.chunks_exact(6) {
        let rel = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]) % (MAX_RELATIVE_MS + 1);
        let word = u16::from_le_bytes([chunk[4], chunk[5]]);
        let cents = word % (MAX_CENTS + 1);
        let processor = if word & 0x8000 != 0 { Processor::Fallback } else { Processor::Default };

        let ts = EPOCH + i64::from(rel);
        let value = Decimal::new(i64::from(cents), 2);
        store.append(ts, value, processor).expect("in-range event rejected");
        expected.push((ts, value, processor));
    }

    // Property 1: one decoded item per append, in order, fields exact
    let items = store.read_all();
    assert_eq!(items.len(), expected.len(), "length mismatch");
    for (item, &(ts, value, processor)) in items.iter().zip(&expected) {
        assert_eq!(item.timestamp, ts, "timestamp mismatch");
        assert_eq!(item.value, value, "value mismatch");
        assert_eq!(item.processor, processor, "processor mismatch");
    }

    // Property 2: packed words stay within 33 bits
    for record in store.packed() {
        assert!(record.raw() < 1_u64 << 33, "packed word too wide");
    }
});

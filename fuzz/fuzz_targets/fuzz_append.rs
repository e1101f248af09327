#![no_main]

use libfuzzer_sys::fuzz_target;
use paypack::RecordStore;
use rust_decimal::Decimal;

const EPOCH: i64 = 1_761_955_455_000;

fuzz_target!(|data: &[u8]| {
    let mut store = RecordStore::with_epoch(EPOCH);

    // Each 16-byte chunk is (timestamp: i64, mantissa: i32, scale: u8 + padding), unclamped
    for chunk in data.chunks_exact(16) {
        let ts = i64::from_le_bytes(chunk[0..8].try_into().unwrap());
        let mantissa = i32::from_le_bytes(chunk[8..12].try_into().unwrap());
        let scale = u32::from(chunk[12] % 29);
        let amount = Decimal::new(i64::from(mantissa), scale);

        let before = store.len();
        let version = store.version();
        match store.add(ts, amount) {
            Ok(()) => {
                assert_eq!(store.len(), before + 1);
                let item = store.read_all()[before];
                assert_eq!(item.timestamp, ts);
                assert!((item.value - amount.abs()).abs() <= Decimal::new(5, 3));
            }
            // Rejections must leave the store untouched
            Err(_) => {
                assert_eq!(store.len(), before);
                assert_eq!(store.version(), version);
            }
        }
    }
});

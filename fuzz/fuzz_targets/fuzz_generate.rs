#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(raw) = serde_json::from_str::<serde_json::Value>(s) {
            // Must not panic — errors are fine, panics are bugs.
            let config = edifakt::OrdersConfig::default();
            let _ = edifakt::generate(&raw, &config);
        }
    }
});

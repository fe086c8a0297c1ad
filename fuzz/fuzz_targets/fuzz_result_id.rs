#![no_main]

use libfuzzer_sys::fuzz_target;
use testmonitor::ResultId;

fuzz_target!(|data: &str| {
    // Test ResultId creation with arbitrary strings
    if let Some(id) = ResultId::new(data) {
        // The id is opaque and must roundtrip unchanged
        assert_eq!(id.as_str(), data);
        assert_eq!(id.to_string(), data);
    } else {
        // Creation only fails for empty input
        assert!(data.is_empty());
    }
});

#![no_main]

//! Fuzz testing for Configuration validation.
//!
//! Arbitrary server strings and keys must never panic, and every accepted
//! configuration must satisfy the documented invariants.

use libfuzzer_sys::fuzz_target;
use testmonitor::Configuration;

fuzz_target!(|input: (&str, &str)| {
    let (server, api_key) = input;

    if let Ok(config) = Configuration::new(server, api_key) {
        let address = config.server_address();
        assert!(matches!(address.scheme(), "http" | "https"));
        assert!(address.host_str().is_some_and(|host| !host.is_empty()));
        assert!(!config.api_key().is_empty());
        assert_eq!(config.api_key(), api_key);
    }
});

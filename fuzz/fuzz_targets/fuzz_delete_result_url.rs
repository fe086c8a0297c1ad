#![no_main]

//! Fuzz testing for the single-result URL.
//!
//! Whatever the id contains, it must land in exactly one path segment below
//! `results` and must not leak into the query.

use libfuzzer_sys::fuzz_target;
use testmonitor::nitestmonitor::api::delete_result_url;
use testmonitor::{Configuration, ResultId};

fuzz_target!(|input: (&str, bool)| {
    let (data, delete_steps) = input;
    let Some(id) = ResultId::new(data) else {
        return;
    };
    if data == "." || data == ".." {
        return;
    }

    let config = Configuration::new("https://example.test/prefix/", "key").unwrap();
    let url = delete_result_url(&config, &id, delete_steps);

    let segments: Vec<&str> = url.path_segments().unwrap().collect();
    assert_eq!(segments.len(), 5);
    assert_eq!(&segments[..4], &["prefix", "nitestmonitor", "v2", "results"]);

    let query: Vec<_> = url.query_pairs().collect();
    assert_eq!(query.len(), 1);
    assert_eq!(query[0].0, "deleteSteps");
    assert_eq!(query[0].1, if delete_steps { "true" } else { "false" });
});

//! Integration tests for result deletion.
//!
//! These tests require a reachable server and an API key, and are ignored by
//! default. To run them:
//!
//! 1. Create a `.env` file in the project root
//!
//! 2. Run with: `cargo test -- --ignored`
//!
//! # Environment Variables
//!
//! | Variable | Required | Description |
//! |----------|----------|-------------|
//! | `SYSTEMLINK_SERVER_URL` | Yes | Server URL, e.g. `https://myserver:9091` |
//! | `SYSTEMLINK_API_KEY` | Yes | API key allowed to delete results |
//!
//! The tests only delete ids that cannot exist, so they never remove real data.

use testmonitor::{Configuration, DeleteResults, DeletionClient};

/// Id in the server's format that no result will ever have.
const MISSING_RESULT_ID: &str = "000000000000000000000000";

/// Helper to load configuration from the environment.
/// Returns None if credentials are not available.
fn get_test_config() -> Option<Configuration> {
    // Load .env file if present (ignore errors if file doesn't exist)
    let _ = dotenvy::dotenv();

    Configuration::from_env().ok()
}

#[tokio::test]
#[ignore = "requires SYSTEMLINK_SERVER_URL and SYSTEMLINK_API_KEY"]
async fn test_delete_missing_result_is_rejected() {
    let Some(config) = get_test_config() else {
        eprintln!("Skipping: credentials not configured");
        return;
    };

    let client = DeletionClient::new().expect("Failed to create client");
    let err = client
        .delete_result(&config, MISSING_RESULT_ID, true)
        .await
        .expect_err("Deleting a missing result should not succeed");

    let status = err.status().expect("Server should answer with a status");
    assert!(
        (400..500).contains(&status),
        "Expected a client error, got {}",
        status
    );
}

#[tokio::test]
#[ignore = "requires SYSTEMLINK_SERVER_URL and SYSTEMLINK_API_KEY"]
async fn test_delete_missing_results_batch() {
    let Some(config) = get_test_config() else {
        eprintln!("Skipping: credentials not configured");
        return;
    };

    let client = DeletionClient::new().expect("Failed to create client");
    match client
        .delete_results(&config, &[MISSING_RESULT_ID], false)
        .await
    {
        // The batch endpoint may accept the call and report the miss in the body
        Ok(outcome) => assert!(outcome.reports_error()),
        Err(err) => assert!(err.status().is_some(), "Unexpected error: {}", err),
    }
}

#[tokio::test]
#[ignore = "requires SYSTEMLINK_SERVER_URL"]
async fn test_invalid_api_key_is_rejected() {
    let Some(config) = get_test_config() else {
        eprintln!("Skipping: credentials not configured");
        return;
    };
    let config = Configuration::from_url(config.server_address().clone(), "invalid-api-key")
        .expect("Failed to create configuration");

    let client = DeletionClient::new().expect("Failed to create client");
    let err = client
        .delete_result(&config, MISSING_RESULT_ID, true)
        .await
        .expect_err("An invalid key should be rejected");
    assert_eq!(err.status(), Some(401));
}

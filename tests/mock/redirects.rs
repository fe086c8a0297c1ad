//! Mock-based tests for redirect answers.
//!
//! A 3xx answer is a rejection like any other non-2xx status. The client
//! never follows the `Location`, so the API key stays on the configured server.

use crate::common::constants::*;
use crate::common::{mock_config, received, setup_mock_server};

use testmonitor::{DeleteError, DeleteResults, DeletionClient, HttpClientConfig};
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REDIRECT_STATUSES: [u16; 3] = [301, 302, 307];

/// Mounts a catch-all on `target` that must never be hit.
async fn mount_unreachable_target(target: &MockServer) {
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(target)
        .await;
}

fn redirect_to(status: u16, target: &MockServer) -> ResponseTemplate {
    ResponseTemplate::new(status).insert_header("location", format!("{}/elsewhere", target.uri()))
}

fn assert_redirect_rejected(err: &DeleteError, status: u16) {
    assert!(
        matches!(err, DeleteError::RemoteRejection { status: s, .. } if *s == status),
        "Expected a rejection with status {status}, got {err:?}"
    );
    assert_eq!(err.outcome().map(|o| o.succeeded), Some(false));
}

#[tokio::test]
async fn test_delete_result_redirect_is_rejected() {
    for status in REDIRECT_STATUSES {
        let server = setup_mock_server().await;
        let target = setup_mock_server().await;
        mount_unreachable_target(&target).await;

        Mock::given(method("DELETE"))
            .and(path(format!("{}/{}", RESULTS_PATH, RESULT_ID_1)))
            .respond_with(redirect_to(status, &target))
            .expect(1)
            .mount(&server)
            .await;

        let err = DeletionClient::new()
            .expect("Failed to create client")
            .delete_result(&mock_config(&server), RESULT_ID_1, true)
            .await
            .unwrap_err();

        assert_redirect_rejected(&err, status);
        assert!(received(&target).await.is_empty());
    }
}

#[tokio::test]
async fn test_delete_results_redirect_is_rejected() {
    for status in REDIRECT_STATUSES {
        let server = setup_mock_server().await;
        let target = setup_mock_server().await;
        mount_unreachable_target(&target).await;

        Mock::given(method("POST"))
            .and(path(DELETE_RESULTS_PATH))
            .respond_with(redirect_to(status, &target))
            .expect(1)
            .mount(&server)
            .await;

        let err = DeletionClient::new()
            .expect("Failed to create client")
            .delete_results(&mock_config(&server), &[RESULT_ID_1, RESULT_ID_2], true)
            .await
            .unwrap_err();

        assert_redirect_rejected(&err, status);
        assert!(received(&target).await.is_empty());
    }
}

#[tokio::test]
async fn test_injected_built_client_does_not_follow_redirects() {
    let server = setup_mock_server().await;
    let target = setup_mock_server().await;
    mount_unreachable_target(&target).await;

    Mock::given(method("POST"))
        .and(path(DELETE_RESULTS_PATH))
        .respond_with(redirect_to(302, &target))
        .mount(&server)
        .await;

    let http_client = HttpClientConfig::new()
        .build_client()
        .expect("Failed to build HTTP client");
    let err = DeletionClient::with_http_client(http_client)
        .delete_results(&mock_config(&server), &[RESULT_ID_1], false)
        .await
        .unwrap_err();

    assert_redirect_rejected(&err, 302);
    assert!(received(&target).await.is_empty());
}

//! Test Monitor result deletion.
//!
//! [`DeletionClient`] deletes test results, optionally together with their
//! steps, authenticating every request with the `x-ni-api-key` header.
//!
//! # Example
//!
//! ```no_run
//! use testmonitor::{Configuration, DeleteResults, DeletionClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let config = Configuration::new("https://myserver:9091", "your-api-key")?;
//! let client = DeletionClient::new()?;
//!
//! // Delete one result and its steps
//! client.delete_result(&config, "5e30934193cac8046851acab", true).await?;
//!
//! // Delete several results, keeping their steps
//! let ids = ["5e30934193cac8046851acac", "5e30934193cac8046851acad"];
//! client.delete_results(&config, &ids, false).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Failure Modes
//!
//! - Missing ids fail with [`DeleteError::InvalidArgument`] before any request is sent.
//! - A non-2xx answer fails with [`DeleteError::RemoteRejection`].
//! - An unreachable server fails with [`DeleteError::TransportFailure`].
//!
//! Nothing is retried.

pub mod api;

use std::sync::Arc;
use std::time::Duration;

pub use api::{Client, DeleteError, API_KEY_HEADER};

use crate::{Configuration, DeleteOutcome, DeleteRequest, DeleteResults, HttpClientConfig, ResultId};

/// Client for the Test Monitor result-deletion endpoints.
///
/// Holds no per-request state, so one instance can serve any number of
/// concurrent deletions. Clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct DeletionClient {
    api_client: Arc<Client>,
}

impl DeletionClient {
    /// Creates a new deletion client with the default transport settings.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Creates a new deletion client with custom transport settings.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::time::Duration;
    /// use testmonitor::{DeletionClient, HttpClientConfig};
    ///
    /// let config = HttpClientConfig::new().timeout(Duration::from_secs(5));
    /// let client = DeletionClient::with_config(config).unwrap();
    /// ```
    pub fn with_config(config: HttpClientConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::from_api_client(Client::with_config(config)?))
    }

    /// Creates a deletion client sharing an existing [`reqwest::Client`].
    ///
    /// The client must be built with
    /// [`redirect::Policy::none`](reqwest::redirect::Policy::none). One that
    /// follows redirects forwards the `x-ni-api-key` header to the redirect
    /// target and reports that target's answer as the deletion outcome.
    pub fn with_http_client(http_client: reqwest::Client) -> Self {
        Self::from_api_client(Client::with_http_client(http_client))
    }

    fn from_api_client(api_client: Client) -> Self {
        Self {
            api_client: Arc::new(api_client),
        }
    }

    /// Returns the low-level API client.
    pub fn api(&self) -> &Client {
        &self.api_client
    }

    /// Executes a deletion request.
    pub async fn execute(
        &self,
        config: &Configuration,
        request: &DeleteRequest,
    ) -> Result<DeleteOutcome, DeleteError> {
        self.dispatch(config, request, None).await
    }

    /// Executes a deletion request that fails with
    /// [`DeleteError::TransportFailure`] if it has not completed within `timeout`.
    pub async fn execute_with_timeout(
        &self,
        config: &Configuration,
        request: &DeleteRequest,
        timeout: Duration,
    ) -> Result<DeleteOutcome, DeleteError> {
        self.dispatch(config, request, Some(timeout)).await
    }

    async fn dispatch(
        &self,
        config: &Configuration,
        request: &DeleteRequest,
        timeout: Option<Duration>,
    ) -> Result<DeleteOutcome, DeleteError> {
        match request {
            DeleteRequest::Single {
                result_id,
                delete_steps,
            } => {
                self.api_client
                    .delete_result(config, result_id, *delete_steps, timeout)
                    .await
            }
            DeleteRequest::Batch {
                result_ids,
                delete_steps,
            } => {
                self.api_client
                    .delete_results(config, result_ids, *delete_steps, timeout)
                    .await
            }
        }
    }
}

impl DeleteResults for DeletionClient {
    async fn delete_result(
        &self,
        config: &Configuration,
        result_id: &str,
        delete_steps: bool,
    ) -> Result<DeleteOutcome, DeleteError> {
        let result_id = parse_result_id(result_id)?;
        self.api_client
            .delete_result(config, &result_id, delete_steps, None)
            .await
    }

    async fn delete_results<S: AsRef<str>>(
        &self,
        config: &Configuration,
        result_ids: &[S],
        delete_steps: bool,
    ) -> Result<DeleteOutcome, DeleteError> {
        let result_ids = parse_result_ids(result_ids)?;
        self.api_client
            .delete_results(config, &result_ids, delete_steps, None)
            .await
    }
}

fn parse_result_id(raw: &str) -> Result<ResultId, DeleteError> {
    ResultId::new(raw).ok_or(DeleteError::InvalidArgument(api::MISSING_RESULT_ID))
}

/// Validates a batch: it must be non-empty and hold no empty id.
fn parse_result_ids<S: AsRef<str>>(raw: &[S]) -> Result<Vec<ResultId>, DeleteError> {
    if raw.is_empty() {
        return Err(DeleteError::InvalidArgument(api::MISSING_RESULT_IDS));
    }
    raw.iter()
        .map(|id| {
            ResultId::new(id.as_ref())
                .ok_or(DeleteError::InvalidArgument(api::EMPTY_RESULT_ID_IN_IDS))
        })
        .collect()
}

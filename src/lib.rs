//! Client for deleting test results through the Test Monitor REST API.
//!
//! The crate covers two calls of the `nitestmonitor/v2` service:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | Delete one result | `DELETE results/{id}?deleteSteps=<bool>` |
//! | Delete many results | `POST delete-results` with `{"ids": [...], "deleteSteps": <bool>}` |
//!
//! Every request carries the API key in the `x-ni-api-key` header. A 2xx answer
//! is a success; anything else is reported as [`DeleteError::RemoteRejection`].
//!
//! # Example
//!
//! ```no_run
//! use testmonitor::{Configuration, DeleteRequest, DeleteResults, DeletionClient, ResultId};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let config = Configuration::from_env()?;
//! let client = DeletionClient::new()?;
//!
//! let outcome = client.delete_result(&config, "5e30934193cac8046851acab", true).await?;
//! assert!(outcome.succeeded);
//!
//! let ids = ["a", "b", "c"].into_iter().filter_map(ResultId::new);
//! let request = DeleteRequest::batch(ids).delete_steps(false);
//! client.execute(&config, &request).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Logging
//!
//! Requests and responses are reported as `tracing` debug events on the
//! `testmonitor::http` target. The API key is never logged.

#![allow(async_fn_in_trait)]

pub mod config;
pub mod nitestmonitor;
pub mod types;

pub use config::{ConfigError, Configuration, HttpClientConfig};
pub use nitestmonitor::{DeleteError, DeletionClient};
pub use types::{DeleteOutcome, DeleteRequest, ResultId, DEFAULT_DELETE_STEPS};

/// Deletes test results.
///
/// Implemented by [`DeletionClient`]. Code that deletes results can be written
/// against this trait and handed a stand-in in tests.
pub trait DeleteResults {
    /// Deletes a single result, and its steps when `delete_steps` is set.
    ///
    /// Fails with [`DeleteError::InvalidArgument`] without sending anything
    /// if `result_id` is empty.
    async fn delete_result(
        &self,
        config: &Configuration,
        result_id: &str,
        delete_steps: bool,
    ) -> Result<DeleteOutcome, DeleteError>;

    /// Deletes several results in one request.
    ///
    /// The server accepts or rejects the batch as a whole. Fails with
    /// [`DeleteError::InvalidArgument`] without sending anything if
    /// `result_ids` is empty or contains an empty id.
    async fn delete_results<S: AsRef<str>>(
        &self,
        config: &Configuration,
        result_ids: &[S],
        delete_steps: bool,
    ) -> Result<DeleteOutcome, DeleteError>;
}

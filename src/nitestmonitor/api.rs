//! Low-level Test Monitor API client.
//!
//! This module talks to the result-deletion endpoints directly. Inputs are
//! already-validated [`ResultId`]s; the string-accepting entry points live on
//! [`DeletionClient`](super::DeletionClient).
//!
//! # API Reference
//!
//! - `DELETE /nitestmonitor/v2/results/{id}?deleteSteps=<bool>`
//! - `POST /nitestmonitor/v2/delete-results` with `{"ids": [...], "deleteSteps": <bool>}`

use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::{Configuration, DeleteOutcome, HttpClientConfig, ResultId};

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "x-ni-api-key";

/// Path segments of the service, relative to the server address.
const SERVICE_PATH: &[&str] = &["nitestmonitor", "v2"];

const RESULTS_PATH: &str = "results";
const DELETE_RESULTS_PATH: &str = "delete-results";
const DELETE_STEPS_PARAM: &str = "deleteSteps";

pub(crate) const MISSING_RESULT_ID: &str = "missing required parameter resultId";
pub(crate) const MISSING_RESULT_IDS: &str = "ids is required and cannot be empty";
pub(crate) const EMPTY_RESULT_ID_IN_IDS: &str = "ids cannot contain an empty result id";
const DOT_SEGMENT_RESULT_ID: &str = "resultId cannot be '.' or '..'";

const LOG_TARGET: &str = "testmonitor::http";

/// Errors that may occur when deleting results.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// A required identifier is missing or empty. No request was sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The server answered with a non-2xx status, redirects included.
    #[error("server rejected the request with status {status}")]
    RemoteRejection {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        body: Option<String>,
    },

    /// The request could not be completed (DNS, connection, timeout, body read).
    #[error("HTTP transport error: {0}")]
    TransportFailure(#[from] reqwest::Error),
}

impl DeleteError {
    /// Returns the HTTP status if the server rejected the request.
    pub fn status(&self) -> Option<u16> {
        match self {
            DeleteError::RemoteRejection { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the response body if the server rejected the request with one.
    pub fn body(&self) -> Option<&str> {
        match self {
            DeleteError::RemoteRejection { body, .. } => body.as_deref(),
            _ => None,
        }
    }

    /// Returns the failed outcome if the server rejected the request.
    pub fn outcome(&self) -> Option<DeleteOutcome> {
        match self {
            DeleteError::RemoteRejection { status, body } => Some(DeleteOutcome {
                succeeded: false,
                http_status: *status,
                raw_body: body.clone(),
            }),
            _ => None,
        }
    }

    /// Returns `true` if the request was never sent because an argument was invalid.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, DeleteError::InvalidArgument(_))
    }

    /// Returns `true` if the server could not be reached.
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, DeleteError::TransportFailure(_))
    }
}

/// Request body for the `delete-results` endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteResultsRequest<'a> {
    ids: &'a [ResultId],
    delete_steps: bool,
}

/// Builds `{server}/nitestmonitor/v2/{segments...}`.
///
/// Each segment is percent-encoded as a single path segment. A trailing slash
/// or path prefix on the server address is kept.
fn service_url(server_address: &Url, segments: &[&str]) -> Url {
    let mut url = server_address.clone();
    url.set_query(None);
    url.set_fragment(None);
    // Configuration only admits http(s) URLs with a host, which can always be a base.
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty()
            .extend(SERVICE_PATH.iter().chain(segments));
    }
    url
}

/// Returns the URL deleting a single result.
///
/// `result_id` becomes one path segment. The dot segments `.` and `..` cannot
/// be addressed this way; [`Client::delete_result`] rejects them.
pub fn delete_result_url(config: &Configuration, result_id: &ResultId, delete_steps: bool) -> Url {
    let mut url = service_url(config.server_address(), &[RESULTS_PATH, result_id.as_str()]);
    url.query_pairs_mut()
        .append_pair(DELETE_STEPS_PARAM, if delete_steps { "true" } else { "false" });
    url
}

/// Returns the URL of the batch deletion endpoint.
pub fn delete_results_url(config: &Configuration) -> Url {
    service_url(config.server_address(), &[DELETE_RESULTS_PATH])
}

/// Test Monitor API client.
///
/// Wraps a shared [`reqwest::Client`]; cloning is cheap and clones share the
/// connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    http_client: reqwest::Client,
}

impl Client {
    /// Creates a new client with the default transport settings.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Creates a new client with custom transport settings.
    pub fn with_config(config: HttpClientConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_http_client(config.build_client()?))
    }

    /// Creates a client on top of an existing [`reqwest::Client`].
    pub fn with_http_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }

    /// Starts an authenticated request.
    fn request(
        &self,
        config: &Configuration,
        method: Method,
        url: Url,
        timeout: Option<Duration>,
    ) -> RequestBuilder {
        let builder = self
            .http_client
            .request(method, url)
            .header(API_KEY_HEADER, config.api_key_header().clone());

        match timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        }
    }

    /// Sends the request and turns the response into an outcome.
    ///
    /// 2xx yields a succeeded outcome; any other status is a
    /// [`DeleteError::RemoteRejection`] carrying the status and body.
    async fn send(&self, builder: RequestBuilder) -> Result<DeleteOutcome, DeleteError> {
        let request = builder.build()?;
        let method = request.method().clone();
        let url = request.url().clone();

        tracing::debug!(target: LOG_TARGET, %method, %url, "sending request");
        let response = self.http_client.execute(request).await?;

        let status = response.status();
        let text = response.text().await?;
        tracing::debug!(target: LOG_TARGET, %method, %url, status = status.as_u16(), "response received");

        let raw_body = (!text.is_empty()).then_some(text);
        if !status.is_success() {
            return Err(DeleteError::RemoteRejection {
                status: status.as_u16(),
                body: raw_body,
            });
        }

        Ok(DeleteOutcome {
            succeeded: true,
            http_status: status.as_u16(),
            raw_body,
        })
    }

    /// Deletes a single result.
    ///
    /// Fails with [`DeleteError::InvalidArgument`] if `result_id` is a dot segment.
    pub async fn delete_result(
        &self,
        config: &Configuration,
        result_id: &ResultId,
        delete_steps: bool,
        timeout: Option<Duration>,
    ) -> Result<DeleteOutcome, DeleteError> {
        if matches!(result_id.as_str(), "." | "..") {
            return Err(DeleteError::InvalidArgument(DOT_SEGMENT_RESULT_ID));
        }

        let url = delete_result_url(config, result_id, delete_steps);
        self.send(self.request(config, Method::DELETE, url, timeout))
            .await
    }

    /// Deletes several results in one request.
    ///
    /// Fails with [`DeleteError::InvalidArgument`] if `result_ids` is empty.
    pub async fn delete_results(
        &self,
        config: &Configuration,
        result_ids: &[ResultId],
        delete_steps: bool,
        timeout: Option<Duration>,
    ) -> Result<DeleteOutcome, DeleteError> {
        if result_ids.is_empty() {
            return Err(DeleteError::InvalidArgument(MISSING_RESULT_IDS));
        }

        let body = DeleteResultsRequest {
            ids: result_ids,
            delete_steps,
        };
        let builder = self
            .request(config, Method::POST, delete_results_url(config), timeout)
            .json(&body);
        self.send(builder).await
    }
}

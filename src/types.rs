//! Value types for result deletion.
//!
//! A [`ResultId`] names a test result created earlier through the results API.
//! A [`DeleteRequest`] describes one deletion intent, and a [`DeleteOutcome`]
//! is what the server answered.
//!
//! # Wire Format
//!
//! | Variant | Method | Path | Carrier |
//! |---------|--------|------|---------|
//! | [`DeleteRequest::Single`] | `DELETE` | `results/{id}` | query `deleteSteps=<bool>` |
//! | [`DeleteRequest::Batch`] | `POST` | `delete-results` | JSON `{"ids": [...], "deleteSteps": <bool>}` |

use core::fmt;

use serde::Serialize;

/// Default for the `deleteSteps` flag: steps are removed together with their result.
pub const DEFAULT_DELETE_STEPS: bool = true;

/// Identifier of a test result.
///
/// The server assigns the value when the result is created; the client treats it
/// as opaque. The only invariant is that it is not empty.
///
/// # Example
///
/// ```
/// use testmonitor::ResultId;
///
/// let id = ResultId::new("5e30934193cac8046851acab").unwrap();
/// assert_eq!(id.as_str(), "5e30934193cac8046851acab");
/// assert!(ResultId::new("").is_none());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ResultId(String);

impl ResultId {
    /// Creates a result identifier.
    ///
    /// Returns `None` if the identifier is empty.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.is_empty() {
            return None;
        }
        Some(Self(id))
    }

    /// Returns the identifier as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the identifier and returns the owned string.
    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResultId({:?})", self.0)
    }
}

impl fmt::Display for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResultId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A deletion intent for one or many results.
///
/// `delete_steps` controls whether the server cascades the deletion to the
/// steps recorded under each result. Both constructors default it to
/// [`DEFAULT_DELETE_STEPS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteRequest {
    /// Delete a single result.
    Single {
        /// The result to delete.
        result_id: ResultId,
        /// Whether the result's steps are deleted too.
        delete_steps: bool,
    },
    /// Delete several results in one call.
    ///
    /// Order is preserved on the wire and duplicates are sent as given.
    Batch {
        /// The results to delete. Must not be empty when executed.
        result_ids: Vec<ResultId>,
        /// Whether the results' steps are deleted too.
        delete_steps: bool,
    },
}

impl DeleteRequest {
    /// Creates a request deleting one result and its steps.
    pub fn single(result_id: ResultId) -> Self {
        DeleteRequest::Single {
            result_id,
            delete_steps: DEFAULT_DELETE_STEPS,
        }
    }

    /// Creates a request deleting several results and their steps.
    pub fn batch(result_ids: impl IntoIterator<Item = ResultId>) -> Self {
        DeleteRequest::Batch {
            result_ids: result_ids.into_iter().collect(),
            delete_steps: DEFAULT_DELETE_STEPS,
        }
    }

    /// Sets whether steps are deleted along with the results.
    pub fn delete_steps(self, delete_steps: bool) -> Self {
        match self {
            DeleteRequest::Single { result_id, .. } => DeleteRequest::Single {
                result_id,
                delete_steps,
            },
            DeleteRequest::Batch { result_ids, .. } => DeleteRequest::Batch {
                result_ids,
                delete_steps,
            },
        }
    }

    /// Returns `true` if steps are deleted along with the results.
    pub fn deletes_steps(&self) -> bool {
        match self {
            DeleteRequest::Single { delete_steps, .. }
            | DeleteRequest::Batch { delete_steps, .. } => *delete_steps,
        }
    }

    /// Returns the identifiers targeted by this request, in wire order.
    pub fn result_ids(&self) -> &[ResultId] {
        match self {
            DeleteRequest::Single { result_id, .. } => core::slice::from_ref(result_id),
            DeleteRequest::Batch { result_ids, .. } => result_ids,
        }
    }
}

/// What the server answered to one deletion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Whether the server answered with a 2xx status.
    pub succeeded: bool,
    /// The HTTP status code of the response.
    pub http_status: u16,
    /// The response body, `None` when the server sent none.
    pub raw_body: Option<String>,
}

impl DeleteOutcome {
    /// Returns `true` if a body is present and is a JSON object with a
    /// top-level `"error"` member.
    ///
    /// The batch endpoint may answer `200` with such a body when it could not
    /// delete every id. The call still counts as succeeded; this only exposes
    /// the signal for callers that want to look at it.
    pub fn reports_error(&self) -> bool {
        self.raw_body
            .as_deref()
            .and_then(|body| serde_json::from_str::<serde_json::Value>(body).ok())
            .is_some_and(|value| value.get("error").is_some())
    }
}

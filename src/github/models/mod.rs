//! Data models for the pull request and its changed files.
//!
//! Types prefixed with `Api` are internal deserialisation targets that
//! convert into public domain types.

use http::HeaderMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::error::CheckError;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Lifecycle state reported by GitHub for a pull request.
///
/// Merged pull requests are reported as `closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PullRequestState {
    /// The pull request accepts further changes.
    Open,
    /// The pull request was merged or closed.
    Closed,
}

impl PullRequestState {
    /// Returns the string representation used by the GitHub API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

/// Pull request metadata as fetched for a single guard run.
///
/// Keeps the whole response (status, request URL, headers and body) so the
/// payload handed to downstream steps can be read as `payload.data.head.sha`.
#[derive(Debug, Clone, PartialEq)]
pub struct PullRequestSnapshot {
    /// Pull request number.
    pub number: u64,
    /// Open or closed.
    pub state: PullRequestState,
    /// Commit at the tip of the source branch.
    pub head_sha: String,
    /// Response envelope with the untouched body under `data`.
    pub raw: Value,
}

/// Wraps a response body with its status, URL and headers.
///
/// Header names are lowercase. Repeated headers are joined with `", "`.
#[must_use]
pub fn response_payload(status: u16, url: &str, headers: &HeaderMap, data: Value) -> Value {
    let header_object: Map<String, Value> = headers
        .keys()
        .map(|name| {
            let joined = headers
                .get_all(name)
                .iter()
                .filter_map(|value| value.to_str().ok())
                .collect::<Vec<_>>()
                .join(", ");
            (name.as_str().to_owned(), Value::String(joined))
        })
        .collect();

    json!({
        "status": status,
        "url": url,
        "headers": header_object,
        "data": data,
    })
}

impl PullRequestSnapshot {
    /// Interprets a response envelope built by [`response_payload`].
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Decode`] when the envelope has no `data`, or the
    /// body lacks the number, state or head sha, or reports a state other
    /// than `open` or `closed`.
    pub fn from_payload(raw: Value) -> Result<Self, CheckError> {
        let data = raw.get("data").ok_or_else(|| CheckError::Decode {
            message: "pull request response has no data".to_owned(),
        })?;
        let api = ApiPullRequest::deserialize(data).map_err(|error| CheckError::Decode {
            message: format!("pull request body: {error}"),
        })?;

        Ok(Self {
            number: api.number,
            state: api.state,
            head_sha: api.head.sha,
            raw,
        })
    }

    /// Whether the pull request is still open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state == PullRequestState::Open
    }

    /// Serialises the response envelope for use as a step output.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Decode`] if the body cannot be serialised.
    pub fn serialise_payload(&self) -> Result<String, CheckError> {
        serde_json::to_string(&self.raw).map_err(|error| CheckError::Decode {
            message: format!("serialise payload: {error}"),
        })
    }
}

/// Ordered filenames touched by a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangedFileSet(Vec<String>);

impl ChangedFileSet {
    /// Wraps an ordered list of filenames.
    #[must_use]
    pub const fn new(filenames: Vec<String>) -> Self {
        Self(filenames)
    }

    /// Borrow the filenames in API order.
    #[must_use]
    pub fn filenames(&self) -> &[String] {
        &self.0
    }

    /// Number of changed files.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the pull request changes no files.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<String> for ChangedFileSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl std::fmt::Display for ChangedFileSet {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.0.join(", "))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiPullRequest {
    pub(super) number: u64,
    pub(super) state: PullRequestState,
    pub(super) head: ApiCommitRef,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiCommitRef {
    pub(super) sha: String,
}

/// API response entry for the pull request files listing.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiChangedFile {
    pub(super) filename: String,
}

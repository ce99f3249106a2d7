//! Test helpers for constructing pull request fixtures.
//!
//! # Examples
//!
//! ```
//! use check_valid_pr::github::models::test_support::{changed_files, open_snapshot};
//!
//! let snapshot = open_snapshot(5, "abc123");
//! assert!(snapshot.is_open());
//!
//! let files = changed_files(&["src/a.js"]);
//! assert_eq!(files.len(), 1);
//! ```

use http::HeaderMap;
use serde_json::json;

use super::{ChangedFileSet, PullRequestSnapshot, PullRequestState, response_payload};

/// Builds a snapshot whose envelope wraps a minimal GitHub response.
#[must_use]
pub fn snapshot(number: u64, state: PullRequestState, head_sha: &str) -> PullRequestSnapshot {
    PullRequestSnapshot {
        number,
        state,
        head_sha: head_sha.to_owned(),
        raw: response_payload(
            200,
            &format!("https://api.github.com/repos/octo/repo/pulls/{number}"),
            &HeaderMap::new(),
            json!({
                "number": number,
                "state": state.as_str(),
                "head": { "sha": head_sha },
            }),
        ),
    }
}

/// Builds an open snapshot.
#[must_use]
pub fn open_snapshot(number: u64, head_sha: &str) -> PullRequestSnapshot {
    snapshot(number, PullRequestState::Open, head_sha)
}

/// Builds a closed snapshot.
#[must_use]
pub fn closed_snapshot(number: u64, head_sha: &str) -> PullRequestSnapshot {
    snapshot(number, PullRequestState::Closed, head_sha)
}

/// Builds a changed-file set from string slices.
#[must_use]
pub fn changed_files(filenames: &[&str]) -> ChangedFileSet {
    filenames.iter().copied().map(str::to_owned).collect()
}

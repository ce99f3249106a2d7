//! Error mapping helpers for the Octocrab gateway.

use http::StatusCode;

use crate::github::error::CheckError;

/// Checks if a GitHub error status indicates an authentication failure.
const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Checks if an octocrab error represents a network/transport issue.
const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

/// Checks whether the GitHub error represents a rate limit error based on the
/// HTTP status and message / documentation URL content.
fn is_rate_limit_error(source: &octocrab::GitHubError) -> bool {
    let is_rate_limit_status = matches!(
        source.status_code,
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
    );

    let message_indicates_rate_limit = source.message.to_lowercase().contains("rate limit")
        || source
            .documentation_url
            .as_deref()
            .is_some_and(|url| url.contains("rate-limit"));

    is_rate_limit_status && message_indicates_rate_limit
}

pub(super) fn map_github_error(operation: &str, source: &octocrab::GitHubError) -> CheckError {
    let status = source.status_code;
    let message = format!(
        "{operation} failed: GitHub returned {status} {detail}",
        detail = source.message
    );

    if is_rate_limit_error(source) {
        CheckError::RateLimitExceeded { status, message }
    } else if is_auth_failure(status) {
        CheckError::Authentication { status, message }
    } else {
        CheckError::Api {
            status: Some(status),
            message,
        }
    }
}

/// Maps a non-success status and body from a raw request.
///
/// Bodies carrying GitHub's `message` and `documentation_url` are classified
/// exactly as Octocrab's own errors are.
pub(super) fn map_response_error(operation: &str, status: StatusCode, body: &str) -> CheckError {
    if let Ok(mut source) = serde_json::from_str::<octocrab::GitHubError>(body) {
        source.status_code = status;
        return map_github_error(operation, &source);
    }

    let message = format!("{operation} failed: GitHub returned {status}");
    if is_auth_failure(status) {
        CheckError::Authentication { status, message }
    } else {
        CheckError::Api {
            status: Some(status),
            message,
        }
    }
}

pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> CheckError {
    if let octocrab::Error::GitHub { source, .. } = error {
        return map_github_error(operation, source);
    }

    if is_network_error(error) {
        return CheckError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    if let octocrab::Error::Serde { .. } | octocrab::Error::Json { .. } = error {
        return CheckError::Decode {
            message: format!("{operation} failed: {error}"),
        };
    }

    CheckError::Api {
        status: None,
        message: format!("{operation} failed: {error}"),
    }
}

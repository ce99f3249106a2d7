//! Error types exposed by the pull request guard.

use http::StatusCode;
use thiserror::Error;

/// Errors surfaced while reading configuration or communicating with GitHub.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckError {
    /// No pull request number was configured.
    #[error("pull request number is required (use --pr or INPUT_PR)")]
    MissingPullRequestNumber,

    /// The pull request number is not a valid integer.
    #[error("pull request number must be a positive integer, got {value:?}")]
    InvalidPullRequestNumber {
        /// The value that failed to parse.
        value: String,
    },

    /// No repository slug was configured.
    #[error("repository is required (use --repo or INPUT_REPO)")]
    MissingRepository,

    /// The repository slug is not of the form `owner/name`.
    #[error("repository must match owner/name, got {value:?}")]
    InvalidRepository {
        /// The slug that failed to split.
        value: String,
    },

    /// The authentication token was missing.
    #[error("personal access token is required")]
    MissingToken,

    /// A configured URL could not be parsed.
    #[error("URL is invalid: {0}")]
    InvalidUrl(String),

    /// The authentication token was rejected by GitHub.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// HTTP status returned by GitHub.
        status: StatusCode,
        /// GitHub error message returned with the 401/403 response.
        message: String,
    },

    /// The API returned a rate limit error.
    #[error("GitHub API rate limit exceeded: {message}")]
    RateLimitExceeded {
        /// HTTP status returned by GitHub.
        status: StatusCode,
        /// Error message from GitHub.
        message: String,
    },

    /// GitHub returned a non-authentication API error.
    #[error("GitHub API error: {message}")]
    Api {
        /// HTTP status, when the failure came from a GitHub response.
        status: Option<StatusCode>,
        /// Response body from GitHub describing the failure.
        message: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// A GitHub response could not be interpreted.
    #[error("unexpected GitHub response: {message}")]
    Decode {
        /// What was wrong with the response body.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },
}

impl CheckError {
    /// HTTP status of the failed request, when one was received.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Authentication { status, .. } | Self::RateLimitExceeded { status, .. } => {
                Some(*status)
            }
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<std::io::Error> for CheckError {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use rstest::rstest;

    use super::CheckError;

    #[rstest]
    #[case::authentication(
        CheckError::Authentication {
            status: StatusCode::UNAUTHORIZED,
            message: "Bad credentials".to_owned(),
        },
        Some(StatusCode::UNAUTHORIZED)
    )]
    #[case::api_with_status(
        CheckError::Api {
            status: Some(StatusCode::NOT_FOUND),
            message: "Not Found".to_owned(),
        },
        Some(StatusCode::NOT_FOUND)
    )]
    #[case::api_without_status(
        CheckError::Api {
            status: None,
            message: "build client failed".to_owned(),
        },
        None
    )]
    #[case::network(
        CheckError::Network {
            message: "connection refused".to_owned(),
        },
        None
    )]
    fn status_reports_http_code_when_known(
        #[case] error: CheckError,
        #[case] expected: Option<StatusCode>,
    ) {
        assert_eq!(error.status(), expected);
    }
}

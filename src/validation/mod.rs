//! Pull request validity checks.
//!
//! A pull request is valid when it is open, its head matches the expected
//! sha (if one was supplied), and its changed files contain no automation
//! configuration. A change set that mixes automation files with regular files
//! additionally raises a failure alert, since it may be an attempt to smuggle
//! a pipeline change in alongside an innocuous one.
//!
//! The payload output is published as soon as the metadata checks pass,
//! before the changed files are inspected. A pull request rejected only by the
//! file check therefore still has its payload published.

mod files;

pub use files::{AutomationPrefix, DEFAULT_AUTOMATION_PREFIX, FilePartition};

use std::fmt;

use crate::github::error::CheckError;
use crate::github::gateway::PullRequestGateway;
use crate::github::locator::PullRequestLocator;
use crate::github::models::{ChangedFileSet, PullRequestSnapshot};
use crate::outputs::{OutputSink, PAYLOAD_OUTPUT, VALID_OUTPUT};

/// The pull request to check and the head it is expected to have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationTarget {
    locator: PullRequestLocator,
    expected_sha: Option<String>,
}

impl ValidationTarget {
    /// Creates a target. A blank expected sha counts as not supplied.
    #[must_use]
    pub fn new(locator: PullRequestLocator, expected_sha: Option<String>) -> Self {
        let expected = expected_sha
            .map(|sha| sha.trim().to_owned())
            .filter(|sha| !sha.is_empty());
        Self {
            locator,
            expected_sha: expected,
        }
    }

    /// Pull request coordinates.
    #[must_use]
    pub const fn locator(&self) -> &PullRequestLocator {
        &self.locator
    }

    /// Expected head sha, if any.
    #[must_use]
    pub fn expected_sha(&self) -> Option<&str> {
        self.expected_sha.as_deref()
    }
}

/// Outcome of a completed validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Every check passed.
    Valid,
    /// The pull request is no longer open.
    Closed {
        /// Pull request number.
        number: u64,
    },
    /// The head commit differs from the expected sha.
    ShaMismatch {
        /// Pull request number.
        number: u64,
        /// Sha supplied by the caller.
        expected: String,
        /// Sha currently at the head of the pull request.
        actual: String,
    },
    /// The changed files could not be listed.
    FilesUnavailable,
    /// Every changed file is automation configuration.
    AutomationOnly {
        /// Pull request number.
        number: u64,
        /// The automation files.
        automation: Vec<String>,
    },
    /// Automation configuration is mixed with regular files.
    MixedFiles {
        /// Pull request number.
        number: u64,
        /// The regular files.
        regular: Vec<String>,
        /// The automation files.
        automation: Vec<String>,
    },
}

impl Verdict {
    /// Whether the pull request passed every check.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Whether this verdict raises a failure alert.
    #[must_use]
    pub const fn raises_alert(&self) -> bool {
        matches!(self, Self::MixedFiles { .. })
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => formatter.write_str("pull request is valid"),
            Self::Closed { number } => {
                write!(formatter, "Pull Request {number} was previously merged")
            }
            Self::ShaMismatch {
                number,
                expected,
                actual,
            } => write!(
                formatter,
                "PR #{number} sha ({actual}) does not equal the expected sha ({expected})"
            ),
            Self::FilesUnavailable => formatter.write_str("No files found."),
            Self::AutomationOnly { number, automation } => write!(
                formatter,
                "PR #{number} only changes workflow files: {}",
                automation.join(", ")
            ),
            Self::MixedFiles {
                number,
                regular,
                automation,
            } => write!(
                formatter,
                "PR #{number} contains a mix of workflow files and regular files. This could \
                 be malicious.\n regular files: {}\nworkflow files: {}",
                regular.join(", "),
                automation.join(", ")
            ),
        }
    }
}

/// Everything a validation run decided and published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Why the pull request is or is not valid.
    pub verdict: Verdict,
    /// Serialised pull request, present once the metadata checks passed.
    pub payload: Option<String>,
    /// Changed files, when they were inspected and fetched.
    pub files: Option<ChangedFileSet>,
}

impl ValidationReport {
    /// The value published as the `VALID` output.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.verdict.is_valid()
    }

    /// Whether the run raised a failure alert.
    #[must_use]
    pub const fn raised_alert(&self) -> bool {
        self.verdict.raises_alert()
    }
}

/// Runs the checks against a gateway and publishes outputs to a sink.
pub struct PullRequestValidator<'run, Gateway, Sink>
where
    Gateway: PullRequestGateway,
    Sink: OutputSink,
{
    gateway: &'run Gateway,
    sink: &'run Sink,
    prefix: AutomationPrefix,
}

impl<'run, Gateway, Sink> PullRequestValidator<'run, Gateway, Sink>
where
    Gateway: PullRequestGateway,
    Sink: OutputSink,
{
    /// Creates a validator.
    #[must_use]
    pub const fn new(gateway: &'run Gateway, sink: &'run Sink, prefix: AutomationPrefix) -> Self {
        Self {
            gateway,
            sink,
            prefix,
        }
    }

    /// Validates the target pull request.
    ///
    /// Publishes `payload` when the metadata checks pass and `VALID` once a
    /// verdict is reached. A mixed change set also raises a failure alert.
    ///
    /// # Errors
    ///
    /// Returns the gateway error when the pull request itself cannot be
    /// fetched; nothing is published in that case. Output sink failures are
    /// also returned. A failure to list changed files is not an error: the
    /// run completes with [`Verdict::FilesUnavailable`].
    pub async fn validate(&self, target: &ValidationTarget) -> Result<ValidationReport, CheckError> {
        let locator = target.locator();
        let snapshot = self.gateway.pull_request(locator).await?;
        tracing::debug!(
            "fetched {locator}: state {}, head {}",
            snapshot.state.as_str(),
            snapshot.head_sha
        );

        let report = if let Some(rejection) = metadata_rejection(&snapshot, target.expected_sha())
        {
            tracing::info!("{rejection}");
            ValidationReport {
                verdict: rejection,
                payload: None,
                files: None,
            }
        } else {
            let payload = snapshot.serialise_payload()?;
            self.sink.set_output(PAYLOAD_OUTPUT, &payload)?;
            self.inspect_files(locator, snapshot.number, payload).await?
        };

        let valid = report.is_valid();
        tracing::info!("Is valid?: {valid}");
        self.sink
            .set_output(VALID_OUTPUT, if valid { "true" } else { "false" })?;

        Ok(report)
    }

    async fn inspect_files(
        &self,
        locator: &PullRequestLocator,
        number: u64,
        payload: String,
    ) -> Result<ValidationReport, CheckError> {
        let files = match self.gateway.changed_files(locator).await {
            Ok(files) => files,
            Err(error) => {
                tracing::warn!("listing files for {locator} failed: {error}");
                let verdict = Verdict::FilesUnavailable;
                tracing::info!("{verdict}");
                return Ok(ValidationReport {
                    verdict,
                    payload: Some(payload),
                    files: None,
                });
            }
        };

        let verdict = file_verdict(number, &files, &self.prefix);
        if verdict.raises_alert() {
            let alert = verdict.to_string();
            tracing::error!("{alert}");
            self.sink.set_failed(&alert)?;
        } else if !verdict.is_valid() {
            tracing::info!("{verdict}");
        }
        tracing::info!("Files in PR: {files}");

        Ok(ValidationReport {
            verdict,
            payload: Some(payload),
            files: Some(files),
        })
    }
}

/// Returns the reason the metadata disqualifies the pull request, if any.
///
/// A closed pull request is reported as closed even when the sha also
/// differs.
#[must_use]
pub fn metadata_rejection(
    snapshot: &PullRequestSnapshot,
    expected_sha: Option<&str>,
) -> Option<Verdict> {
    if !snapshot.is_open() {
        return Some(Verdict::Closed {
            number: snapshot.number,
        });
    }

    match expected_sha {
        Some(expected) if expected != snapshot.head_sha => Some(Verdict::ShaMismatch {
            number: snapshot.number,
            expected: expected.to_owned(),
            actual: snapshot.head_sha.clone(),
        }),
        _ => None,
    }
}

/// Classifies a fetched change set.
#[must_use]
pub fn file_verdict(number: u64, files: &ChangedFileSet, prefix: &AutomationPrefix) -> Verdict {
    let partition = FilePartition::split(files, prefix);
    if partition.files_valid() {
        Verdict::Valid
    } else if partition.is_mixed() {
        Verdict::MixedFiles {
            number,
            regular: partition.regular,
            automation: partition.automation,
        }
    } else {
        Verdict::AutomationOnly {
            number,
            automation: partition.automation,
        }
    }
}

/// Text of the failure alert raised when a run aborts with `error`.
#[must_use]
pub fn abort_alert(error: &CheckError) -> String {
    match error {
        CheckError::Authentication { .. }
        | CheckError::RateLimitExceeded { .. }
        | CheckError::Api { .. }
        | CheckError::Network { .. }
        | CheckError::Decode { .. } => error.status().map_or_else(
            || "There was a problem with the request. See log.".to_owned(),
            |status| {
                format!(
                    "There was a problem with the request (Status {}). See log.",
                    status.as_u16()
                )
            },
        ),
        _ => error.to_string(),
    }
}

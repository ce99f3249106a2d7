//! Gateways for loading pull requests through Octocrab.
//!
//! The guard depends only on the [`PullRequestGateway`] trait so tests can
//! substitute a mock while the Octocrab implementation handles real HTTP
//! requests.

mod client;
mod error_mapping;
mod pull_request;

pub use pull_request::OctocrabGateway;

use async_trait::async_trait;

use crate::github::error::CheckError;
use crate::github::locator::PullRequestLocator;
use crate::github::models::{ChangedFileSet, PullRequestSnapshot};

/// Remote capability consumed by the validator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PullRequestGateway: Send + Sync {
    /// Fetch the pull request metadata.
    async fn pull_request(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<PullRequestSnapshot, CheckError>;

    /// Fetch every file changed by the pull request, in API order.
    async fn changed_files(&self, locator: &PullRequestLocator)
    -> Result<ChangedFileSet, CheckError>;
}

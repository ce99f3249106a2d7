//! GitHub access for the pull request guard.
//!
//! This module wraps Octocrab to fetch a pull request and its changed files,
//! and maps failures into [`CheckError`] variants so callers can surface
//! precise messages without exposing Octocrab internals.

pub mod error;
pub mod gateway;
pub mod locator;
pub mod models;

pub use error::CheckError;
pub use gateway::{OctocrabGateway, PullRequestGateway};
pub use locator::{
    DEFAULT_API_URL, PersonalAccessToken, PullRequestLocator, PullRequestNumber, RepositoryName,
    RepositoryOwner, parse_repository_slug,
};
pub use models::{ChangedFileSet, PullRequestSnapshot, PullRequestState};

#[cfg(test)]
pub use gateway::MockPullRequestGateway;

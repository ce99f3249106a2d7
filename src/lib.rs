//! Pull request guard for CI pipelines.
//!
//! The library fetches a pull request through Octocrab, checks that it is
//! still open and at the expected head commit, and rejects change sets that
//! touch automation configuration. Mixing automation configuration with
//! regular files raises a failure alert, since pipelines often grant such
//! changes elevated trust.

pub mod config;
pub mod github;
pub mod outputs;
pub mod validation;

pub use config::CheckConfig;
pub use github::{
    ChangedFileSet, CheckError, OctocrabGateway, PersonalAccessToken, PullRequestGateway,
    PullRequestLocator, PullRequestSnapshot, PullRequestState,
};
pub use outputs::{OutputSink, RunnerOutputs};
pub use validation::{
    AutomationPrefix, PullRequestValidator, ValidationReport, ValidationTarget, Verdict,
    abort_alert,
};

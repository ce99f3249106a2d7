//! Guard configuration loaded from CLI, environment, and files.
//!
//! Values are merged with ortho-config's layered approach. The environment
//! prefix is `INPUT`, which is how the runner hands action inputs to a
//! process: an input named `pr` arrives as `INPUT_PR`.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.check-valid-pr.toml` in current directory,
//!    home directory, or XDG config directory
//! 3. **Environment variables** – `INPUT_TOKEN`, `INPUT_PR`, `INPUT_SHA`,
//!    `INPUT_REPO`, ...
//! 4. **Command-line arguments** – `--token`/`-t`, `--pr`/`-p`, `--sha`/`-s`,
//!    `--repo`/`-r`, ...
//!
//! Runner-provided variables (`GITHUB_TOKEN`, `GITHUB_REPOSITORY`,
//! `GITHUB_API_URL`, `GITHUB_OUTPUT`) fill in anything left unset.
//!
//! # Configuration File
//!
//! ```toml
//! repo = "octocat/hello-world"
//! automation_prefix = ".github/"
//! log_level = "debug"
//! ```

use std::env;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::github::error::CheckError;
use crate::github::locator::DEFAULT_API_URL;
use crate::validation::AutomationPrefix;

/// Guard configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use check_valid_pr::CheckConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = CheckConfig::load().expect("failed to load configuration");
/// let pr = config.require_pr().expect("pull request number required");
/// let token = config.resolve_token().expect("token required");
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "INPUT",
    discovery(
        dotfile_name = ".check-valid-pr.toml",
        config_file_name = "check-valid-pr.toml",
        app_name = "check-valid-pr"
    )
)]
pub struct CheckConfig {
    /// Token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `INPUT_TOKEN` or `GITHUB_TOKEN`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Pull request number to check.
    ///
    /// Can be provided via:
    /// - CLI: `--pr <NUMBER>` or `-p <NUMBER>`
    /// - Environment: `INPUT_PR`
    #[ortho_config(cli_short = 'p')]
    pub pr: Option<String>,

    /// Expected head commit of the pull request. Blank means unchecked.
    ///
    /// Can be provided via:
    /// - CLI: `--sha <SHA>` or `-s <SHA>`
    /// - Environment: `INPUT_SHA`
    #[ortho_config(cli_short = 's')]
    pub sha: Option<String>,

    /// Repository as `owner/name`.
    ///
    /// Can be provided via:
    /// - CLI: `--repo <OWNER/NAME>` or `-r <OWNER/NAME>`
    /// - Environment: `INPUT_REPO` or `GITHUB_REPOSITORY`
    /// - Config file: `repo = "..."`
    #[ortho_config(cli_short = 'r')]
    pub repo: Option<String>,

    /// Path prefix identifying automation configuration files.
    ///
    /// Defaults to `.github/`.
    #[ortho_config()]
    pub automation_prefix: Option<String>,

    /// REST API base URL.
    ///
    /// Falls back to `GITHUB_API_URL`, then `https://api.github.com`.
    #[ortho_config()]
    pub api_url: Option<String>,

    /// File that step outputs are appended to.
    ///
    /// Falls back to `GITHUB_OUTPUT`. Without either, outputs are written to
    /// stdout.
    #[ortho_config()]
    pub output_file: Option<String>,

    /// Log verbosity: `error`, `warn`, `info`, `debug` or `trace`.
    #[ortho_config()]
    pub log_level: Option<String>,
}

/// Returns the value when it is present and not blank.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

/// Reads a runner variable, ignoring blank values.
fn runner_variable(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

impl CheckConfig {
    /// Resolves the token from configuration or the `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::MissingToken`] when no source provides a value.
    pub fn resolve_token(&self) -> Result<String, CheckError> {
        non_blank(self.token.as_deref())
            .map(ToOwned::to_owned)
            .or_else(|| runner_variable("GITHUB_TOKEN"))
            .ok_or(CheckError::MissingToken)
    }

    /// Returns the pull request number as configured.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::MissingPullRequestNumber`] when none is set.
    pub fn require_pr(&self) -> Result<&str, CheckError> {
        non_blank(self.pr.as_deref()).ok_or(CheckError::MissingPullRequestNumber)
    }

    /// Resolves the repository slug from configuration or
    /// `GITHUB_REPOSITORY`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::MissingRepository`] when no source provides a
    /// value.
    pub fn resolve_repo(&self) -> Result<String, CheckError> {
        non_blank(self.repo.as_deref())
            .map(ToOwned::to_owned)
            .or_else(|| runner_variable("GITHUB_REPOSITORY"))
            .ok_or(CheckError::MissingRepository)
    }

    /// Expected head sha, treating blank as not supplied.
    #[must_use]
    pub fn expected_sha(&self) -> Option<String> {
        non_blank(self.sha.as_deref()).map(ToOwned::to_owned)
    }

    /// API base URL from configuration, `GITHUB_API_URL`, or the public
    /// default.
    #[must_use]
    pub fn resolve_api_url(&self) -> String {
        non_blank(self.api_url.as_deref())
            .map(ToOwned::to_owned)
            .or_else(|| runner_variable("GITHUB_API_URL"))
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned())
    }

    /// Output file from configuration or `GITHUB_OUTPUT`.
    #[must_use]
    pub fn resolve_output_file(&self) -> Option<PathBuf> {
        non_blank(self.output_file.as_deref())
            .map(ToOwned::to_owned)
            .or_else(|| runner_variable("GITHUB_OUTPUT"))
            .map(PathBuf::from)
    }

    /// The automation prefix, defaulting to `.github/`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Configuration`] when the prefix is configured
    /// but blank.
    pub fn automation_prefix(&self) -> Result<AutomationPrefix, CheckError> {
        self.automation_prefix
            .as_deref()
            .map_or_else(|| Ok(AutomationPrefix::default()), AutomationPrefix::new)
    }

    /// Parsed log level, defaulting to `info`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Configuration`] for unknown level names.
    pub fn log_level(&self) -> Result<Level, CheckError> {
        non_blank(self.log_level.as_deref()).map_or(Ok(Level::INFO), |name| {
            name.parse::<Level>()
                .map_err(|error| CheckError::Configuration {
                    message: format!("log level {name:?}: {error}"),
                })
        })
    }
}

#[cfg(test)]
mod tests;

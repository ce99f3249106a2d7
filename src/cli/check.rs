//! Single pull request check.

use std::process::ExitCode;

use check_valid_pr::{
    CheckConfig, CheckError, OctocrabGateway, PersonalAccessToken, PullRequestLocator,
    PullRequestValidator, RunnerOutputs, ValidationReport, ValidationTarget,
};

/// Validates the configured pull request, publishing outputs to `sink`.
///
/// # Errors
///
/// Returns [`CheckError`] configuration variants when inputs are missing or
/// malformed, and the gateway error when the pull request cannot be fetched.
pub async fn run(
    config: &CheckConfig,
    sink: &RunnerOutputs,
) -> Result<ValidationReport, CheckError> {
    let token = PersonalAccessToken::new(config.resolve_token()?)?;
    let repository = config.resolve_repo()?;
    let locator =
        PullRequestLocator::new(&config.resolve_api_url(), &repository, config.require_pr()?)?;
    let prefix = config.automation_prefix()?;

    tracing::info!("checking pull request {locator}");

    let gateway = OctocrabGateway::for_token(&token, &locator)?;
    let target = ValidationTarget::new(locator, config.expected_sha());
    PullRequestValidator::new(&gateway, sink, prefix)
        .validate(&target)
        .await
}

/// Process status for a finished run.
///
/// Only a raised alert or an aborted run fails the step. An invalid pull
/// request on its own still exits successfully; callers read `VALID`.
#[must_use]
pub const fn exit_code(outcome: &Result<ValidationReport, CheckError>) -> ExitCode {
    match outcome {
        Ok(report) if !report.raised_alert() => ExitCode::SUCCESS,
        Ok(_) | Err(_) => ExitCode::FAILURE,
    }
}

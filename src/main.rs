//! check-valid-pr entrypoint.

mod cli;

use std::io::{self, Write};
use std::process::ExitCode;

use check_valid_pr::outputs::raise_alert;
use check_valid_pr::{CheckConfig, CheckError, RunnerOutputs, abort_alert};
use ortho_config::OrthoConfig;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match load_config() {
        Ok(config) => config,
        Err(error) => return abort(&RunnerOutputs::default(), &error),
    };
    let sink = RunnerOutputs::new(config.resolve_output_file());

    if let Err(error) = config.log_level().and_then(cli::logging::init) {
        return abort(&sink, &error);
    }

    let outcome = cli::check::run(&config, &sink).await;
    if let Err(error) = &outcome {
        return abort(&sink, error);
    }
    cli::check::exit_code(&outcome)
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`CheckError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<CheckConfig, CheckError> {
    CheckConfig::load().map_err(|error| CheckError::Configuration {
        message: error.to_string(),
    })
}

/// Reports a run-ending error and returns the failure status.
///
/// An alert the sink cannot deliver is copied to stderr.
fn abort(sink: &RunnerOutputs, error: &CheckError) -> ExitCode {
    let mut stderr = io::stderr().lock();
    if writeln!(stderr, "{error}").is_err() {
        return ExitCode::FAILURE;
    }

    match raise_alert(sink, &abort_alert(error), &mut stderr) {
        Ok(()) => ExitCode::FAILURE,
        Err(sink_error) => {
            if writeln!(stderr, "failed to raise alert: {sink_error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

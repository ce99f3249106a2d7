//! Log subscriber setup.

use std::io;

use check_valid_pr::CheckError;
use tracing::Level;

/// Installs a stderr formatter at `level`.
///
/// Timestamps are omitted because the runner stamps every log line itself.
///
/// # Errors
///
/// Returns [`CheckError::Configuration`] if a global subscriber is already
/// installed.
pub fn init(level: Level) -> Result<(), CheckError> {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|error| CheckError::Configuration {
            message: format!("install log subscriber: {error}"),
        })
}

//! Binary-side helpers.
//!
//! - [`check`]: Builds the gateway and runs the validator
//! - [`logging`]: Installs the log subscriber

pub mod check;
pub mod logging;

//! Unit tests for configuration loading and precedence.
//!
//! Tests are organised into modules by functional area:
//! - `helpers`: Shared test utilities
//! - `precedence`: Layer precedence tests
//! - `field_resolution`: Token, pull request, repository and fallback
//!   resolution tests
//! - `environment_loading`: Loading runner inputs from `INPUT_*` variables

mod environment_loading;
mod helpers;

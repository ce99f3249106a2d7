//! Tests for loading runner inputs from `INPUT_*` variables and the CLI.

use std::ffi::OsString;

use ortho_config::OrthoConfig;
use rstest::rstest;

use crate::CheckConfig;

/// Loads configuration with an isolated home directory and the given inputs.
fn load_with(inputs: &[(&str, Option<&str>)], cli_args: &[&str]) -> CheckConfig {
    let temp_dir = tempfile::TempDir::new().expect("temp dir should be created");
    let home = temp_dir.path().to_string_lossy().to_string();

    let mut variables: Vec<(&str, Option<&str>)> = vec![
        ("HOME", Some(home.as_str())),
        ("XDG_CONFIG_HOME", Some(home.as_str())),
    ];
    variables.extend_from_slice(inputs);
    let _guard = env_lock::lock_env(variables);

    let mut args: Vec<OsString> = vec![OsString::from("check-valid-pr")];
    args.extend(cli_args.iter().map(OsString::from));

    CheckConfig::load_from_iter(args).expect("config should load")
}

#[rstest]
fn loads_runner_inputs_from_environment() {
    let config = load_with(
        &[
            ("INPUT_TOKEN", Some("ghs_example")),
            ("INPUT_PR", Some("5")),
            ("INPUT_SHA", Some("abc123")),
            ("INPUT_REPO", Some("octo/repo")),
        ],
        &[],
    );

    assert_eq!(config.token.as_deref(), Some("ghs_example"));
    assert_eq!(config.pr.as_deref(), Some("5"));
    assert_eq!(config.sha.as_deref(), Some("abc123"));
    assert_eq!(config.repo.as_deref(), Some("octo/repo"));
}

#[rstest]
fn cli_arguments_override_runner_inputs() {
    let config = load_with(
        &[("INPUT_PR", Some("5")), ("INPUT_REPO", Some("octo/repo"))],
        &["--pr", "9", "-r", "other/repo"],
    );

    assert_eq!(config.pr.as_deref(), Some("9"));
    assert_eq!(config.repo.as_deref(), Some("other/repo"));
}

//! CLI interface tests
//!
//! Tests basic CLI functionality like --help, --version flags and argument
//! validation that happens before any backend is contacted.

use predicates::prelude::*;

mod common;
use common::get_bin;

#[test]
fn test_cli_help_flag_displays_usage_information() {
    get_bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("IRis"))
        .stdout(predicate::str::contains("optimize"))
        .stdout(predicate::str::contains("compare"));
}

#[test]
fn test_cli_version_flag_displays_version_number() {
    get_bin()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_without_subcommand_prints_help() {
    get_bin()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_unknown_subcommand_is_usage_error() {
    get_bin().arg("benchmark").assert().code(2);
}

#[test]
fn test_completions_bash() {
    get_bin()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("iris"))
        .stdout(predicate::str::contains("optimize"));
}

#[test]
fn test_invalid_backend_url_is_config_error() {
    let project = common::fixtures::Project::new().unwrap();
    get_bin()
        .current_dir(project.path())
        .args(["--backend", "ftp://example.com", "health"])
        .assert()
        .code(78)
        .stderr(predicate::str::contains("iris init --force"));
}

#[test]
fn test_backend_env_var_is_honored() {
    let project = common::fixtures::Project::new().unwrap();
    get_bin()
        .current_dir(project.path())
        .env("IRIS_BACKEND_URL", "not a url")
        .arg("health")
        .assert()
        .code(78);
}

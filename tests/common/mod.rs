//! Common test utilities and helpers
//!
//! This module provides shared functionality for integration tests:
//! - A preconfigured handle on the `iris` binary
//! - Source files, configs and stored sessions in temp directories
//! - Assertions on JSON output
//!
//! # Usage
//!
//! ```rust,no_run
//! mod common;
//! use common::fixtures;
//!
//! let project = fixtures::Project::new()?;
//! project.write_source("loop.c", fixtures::SAMPLE_C)?;
//! common::get_bin().current_dir(project.path()).arg("health");
//! ```

pub mod assertions;
pub mod fixtures;

use assert_cmd::Command;

/// Address nothing listens on, for exercising the offline paths
#[allow(dead_code)]
pub const UNREACHABLE_BACKEND: &str = "http://127.0.0.1:9";

/// Get the iris binary with a clean environment.
///
/// `IRIS_BACKEND_URL` is removed so a developer's shell cannot point the
/// tests at a live backend, and colors are disabled for stable output.
#[allow(dead_code)]
pub fn get_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_iris"));
    cmd.env_remove("IRIS_BACKEND_URL").arg("--no-color");
    cmd
}

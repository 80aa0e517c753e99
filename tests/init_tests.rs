//! Tests for the `init` command

use predicates::prelude::*;
use std::fs;

mod common;
use common::{fixtures::Project, get_bin};

#[test]
fn test_init_creates_config_file() {
    let project = Project::new().unwrap();

    get_bin()
        .current_dir(project.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created .iris.toml"));

    let contents = fs::read_to_string(project.path().join(".iris.toml")).unwrap();
    assert!(contents.contains("http://localhost:5001"));
    assert!(contents.contains("num-runs = 3"));
}

#[test]
fn test_init_keeps_existing_config() {
    let project = Project::new().unwrap();
    project.write_config("[defaults]\nnum-runs = 7\n").unwrap();

    get_bin()
        .current_dir(project.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    let contents = fs::read_to_string(project.path().join(".iris.toml")).unwrap();
    assert!(contents.contains("num-runs = 7"));
}

#[test]
fn test_init_force_overwrites() {
    let project = Project::new().unwrap();
    project.write_config("[defaults]\nnum-runs = 7\n").unwrap();

    get_bin()
        .current_dir(project.path())
        .args(["init", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Overwrote"));

    let contents = fs::read_to_string(project.path().join(".iris.toml")).unwrap();
    assert!(contents.contains("num-runs = 3"));
}

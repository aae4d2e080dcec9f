//! Integration tests for init and config commands

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::storyset_cmd;

#[test]
fn test_init_creates_config() {
    let temp = TempDir::new().unwrap();

    storyset_cmd()
        .arg("init")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized storyset workspace"));

    assert!(temp.path().join(".storyset").is_dir());
    assert!(temp.path().join(".storyset/store").is_dir());

    let content = fs::read_to_string(temp.path().join(".storyset/config.toml")).unwrap();
    assert!(content.contains("collection = \"sinhala_story_dataset_simple\""));
    assert!(content.contains("backend = \"file\""));
    assert!(!content.contains("app_id"));
}

#[test]
fn test_init_with_app_id() {
    let temp = TempDir::new().unwrap();

    storyset_cmd()
        .arg("init")
        .arg(temp.path())
        .arg("--app-id")
        .arg("school-42")
        .assert()
        .success();

    let content = fs::read_to_string(temp.path().join(".storyset/config.toml")).unwrap();
    assert!(content.contains("app_id = \"school-42\""));
}

#[test]
fn test_init_already_initialized_fails() {
    let temp = TempDir::new().unwrap();

    storyset_cmd().arg("init").arg(temp.path()).assert().success();
    storyset_cmd()
        .arg("init")
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn test_command_outside_workspace_fails_with_code_2() {
    let temp = TempDir::new().unwrap();

    storyset_cmd()
        .current_dir(temp.path())
        .env("STORYSET_ROOT", temp.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("STORYSET_ROOT"));

    // Without the override, discovery walks up and reports the start dir
    let nested = temp.path().join("a");
    fs::create_dir(&nested).unwrap();
    let output = storyset_cmd()
        .current_dir(&nested)
        .arg("list")
        .output()
        .unwrap();
    if !output.status.success() {
        assert_eq!(output.status.code(), Some(2));
        assert!(String::from_utf8_lossy(&output.stderr).contains("storyset init"));
    }
}

#[test]
fn test_config_set_and_get() {
    let temp = TempDir::new().unwrap();
    storyset_cmd().arg("init").arg(temp.path()).assert().success();

    storyset_cmd()
        .current_dir(temp.path())
        .args(["config", "default_grade", "Grade 3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set default_grade = Grade 3"));

    storyset_cmd()
        .current_dir(temp.path())
        .args(["config", "default_grade"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Grade 3"));
}

#[test]
fn test_config_list_masks_token() {
    let temp = TempDir::new().unwrap();
    storyset_cmd().arg("init").arg(temp.path()).assert().success();

    storyset_cmd()
        .current_dir(temp.path())
        .args(["config", "auth_token", "hunter2"])
        .assert()
        .success();

    storyset_cmd()
        .current_dir(temp.path())
        .args(["config", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("collection = sinhala_story_dataset_simple"))
        .stdout(predicate::str::contains("auth_token = <set>"))
        .stdout(predicate::str::contains("created = "))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn test_config_invalid_values_fail() {
    let temp = TempDir::new().unwrap();
    storyset_cmd().arg("init").arg(temp.path()).assert().success();

    storyset_cmd()
        .current_dir(temp.path())
        .args(["config", "default_grade", "Grade 9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Valid grades"));

    storyset_cmd()
        .current_dir(temp.path())
        .args(["config", "backend", "cloud"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Valid backends: file"));

    storyset_cmd()
        .current_dir(temp.path())
        .args(["config", "backend", "memory"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not persist between commands"));

    storyset_cmd()
        .current_dir(temp.path())
        .args(["config", "created", "2020-01-01T00:00:00Z"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("read-only"));

    storyset_cmd()
        .current_dir(temp.path())
        .args(["config", "colour"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key: 'colour'"));
}

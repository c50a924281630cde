//! Integration tests for `autodock config`.
//!
//! All tests set `AUTODOCK_CONFIG` to a temp path so they never read or write
//! `~/.autodock/config.yaml`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn autodock() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("autodock"));
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Returns a `TempDir` and the path string for a config file inside it.
fn temp_config_path() -> (TempDir, String) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir
        .path()
        .join("config.yaml")
        .to_string_lossy()
        .into_owned();
    (dir, path)
}

#[test]
fn test_config_show_without_file_uses_defaults() {
    let (_dir, path) = temp_config_path();
    let assert = autodock()
        .args(["config", "show", "--json"])
        .env("AUTODOCK_CONFIG", &path)
        .assert()
        .success();
    let value: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid JSON");
    assert_eq!(value["config"]["engine"]["binary"], "docker");
    assert_eq!(value["config"]["logs"]["tail"], 100);
    assert_eq!(value["config"]["images"]["node"], "node:18-alpine");
    assert_eq!(value["path"], path.as_str());
}

#[test]
fn test_config_set_then_show() {
    let (_dir, path) = temp_config_path();
    autodock()
        .args(["config", "set", "logs.tail", "50"])
        .env("AUTODOCK_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Set logs.tail = 50"));

    let content = std::fs::read_to_string(&path).expect("config written");
    assert!(content.contains("tail: 50"), "got: {content}");

    autodock()
        .args(["config", "show"])
        .env("AUTODOCK_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("50"));
}

#[test]
fn test_config_set_unknown_key_fails() {
    let (_dir, path) = temp_config_path();
    autodock()
        .args(["config", "set", "engine.timeout", "5"])
        .env("AUTODOCK_CONFIG", &path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown setting: engine.timeout"));
    assert!(!std::path::Path::new(&path).exists());
}

#[test]
fn test_config_set_rejects_non_positive_tail() {
    let (_dir, path) = temp_config_path();
    autodock()
        .args(["config", "set", "logs.tail", "0"])
        .env("AUTODOCK_CONFIG", &path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value for logs.tail"));
}

#[test]
fn test_config_set_rejects_image_with_whitespace() {
    let (_dir, path) = temp_config_path();
    autodock()
        .args(["config", "set", "images.node", "node 20"])
        .env("AUTODOCK_CONFIG", &path)
        .assert()
        .failure();
}

#[test]
fn test_config_error_json_shape() {
    let (_dir, path) = temp_config_path();
    let assert = autodock()
        .args(["config", "set", "nope.key", "1", "--json"])
        .env("AUTODOCK_CONFIG", &path)
        .assert()
        .failure();
    let value: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid JSON");
    assert_eq!(value["error"], true);
    assert_eq!(value["code"], "INVALID_CONFIG");
}

#[test]
fn test_config_show_rejects_invalid_file_values() {
    let (_dir, path) = temp_config_path();
    std::fs::write(&path, "images:\n  node: \"\"\n").unwrap();
    let assert = autodock()
        .args(["config", "show", "--json"])
        .env("AUTODOCK_CONFIG", &path)
        .assert()
        .failure();
    let value: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid JSON");
    assert_eq!(value["code"], "INVALID_CONFIG");
}

//! Integration tests for the project commands against a real directory.
//!
//! The engine is pointed at a binary that does not exist, so every test runs
//! without Docker installed.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const MISSING_ENGINE: &str = "autodock-no-such-engine";

/// Project fixture with an isolated config file and a project directory.
struct Fixture {
    _tmp: TempDir,
    config: PathBuf,
    project: PathBuf,
}

impl Fixture {
    fn new(files: &[(&str, &str)]) -> Self {
        let tmp = TempDir::new().expect("temp dir");
        let project = tmp.path().join("shop");
        std::fs::create_dir_all(&project).expect("mkdir");
        for (rel, content) in files {
            let path = project.join(rel);
            std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
            std::fs::write(path, content).expect("write");
        }
        Self {
            config: tmp.path().join("config.yaml"),
            _tmp: tmp,
            project,
        }
    }

    fn autodock(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("autodock"));
        cmd.env("NO_COLOR", "1")
            .env("AUTODOCK_YES", "1")
            .env("AUTODOCK_CONFIG", &self.config)
            .env("AUTODOCK_ENGINE", MISSING_ENGINE)
            .env_remove("RUST_LOG")
            .arg("--dir")
            .arg(&self.project);
        cmd
    }

    fn has(&self, rel: &str) -> bool {
        self.project.join(rel).exists()
    }
}

fn backend() -> Fixture {
    Fixture::new(&[
        ("package.json", r#"{"name":"shop","main":"server.js"}"#),
        ("server.js", "const app = require('express')();\napp.listen(4000);\n"),
    ])
}

fn json(stdout: &[u8]) -> serde_json::Value {
    serde_json::from_slice(stdout).expect("valid JSON")
}

// ── detect ────────────────────────────────────────────────────────────────────

#[test]
fn test_detect_backend_project_json() {
    let ws = backend();
    let assert = ws.autodock().args(["detect", "--json"]).assert().success();
    let value = json(&assert.get_output().stdout);
    assert_eq!(value["project_type"], "backend-runtime");
    assert_eq!(value["port"], 4000);
    assert_eq!(value["entry"], "server.js");
    assert_eq!(value["name"], "autodock-shop");
    assert!(!ws.has("Dockerfile"), "detect must not write anything");
}

#[test]
fn test_detect_backend_project_human() {
    let ws = backend();
    ws.autodock()
        .arg("detect")
        .assert()
        .success()
        .stdout(predicate::str::contains("4000"))
        .stdout(predicate::str::contains("server.js"));
}

#[test]
fn test_detect_empty_directory_fails() {
    let ws = Fixture::new(&[("README.md", "# shop\n")]);
    ws.autodock()
        .arg("detect")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not detect project type"));
}

#[test]
fn test_detect_empty_directory_json_error_code() {
    let ws = Fixture::new(&[]);
    let assert = ws.autodock().args(["detect", "--json"]).assert().failure();
    let value = json(&assert.get_output().stdout);
    assert_eq!(value["error"], true);
    assert_eq!(value["code"], "CLASSIFICATION_FAILED");
}

#[test]
fn test_detect_without_port_is_fatal_when_non_interactive() {
    let ws = Fixture::new(&[
        ("package.json", r#"{"main":"worker.js"}"#),
        ("worker.js", "run();\n"),
    ]);
    ws.autodock()
        .args(["detect", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not detect the port"));
}

#[test]
fn test_missing_project_directory_fails() {
    let ws = backend();
    let missing = ws.project.join("nope");
    Command::new(assert_cmd::cargo::cargo_bin!("autodock"))
        .env("NO_COLOR", "1")
        .env("AUTODOCK_CONFIG", &ws.config)
        .arg("--dir")
        .arg(&missing)
        .arg("detect")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

// ── engine unavailable ────────────────────────────────────────────────────────

fn assert_untouched(project: &Path) {
    assert!(!project.join("Dockerfile").exists(), "descriptor was written");
    assert!(!project.join(".autodock").exists(), "record was written");
}

#[test]
fn test_create_without_engine_writes_nothing() {
    let ws = backend();
    ws.autodock()
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not running"));
    assert_untouched(&ws.project);
}

#[test]
fn test_create_without_engine_json_error_code() {
    let ws = backend();
    let assert = ws.autodock().arg("--json").assert().failure();
    let value = json(&assert.get_output().stdout);
    assert_eq!(value["code"], "ENGINE_UNAVAILABLE");
    assert_untouched(&ws.project);
}

#[test]
fn test_delete_without_engine_keeps_record() {
    let ws = backend();
    let record = "NAME=autodock-shop\nIMAGE=autodock-shop\nPORT=4000\nENTRY=server.js\nTYPE=backend-runtime\n";
    std::fs::write(ws.project.join(".autodock"), record).expect("write record");

    ws.autodock()
        .arg("delete")
        .assert()
        .failure()
        .stderr(predicate::str::contains(MISSING_ENGINE));
    assert!(ws.has(".autodock"));
}

#[test]
fn test_rebuild_without_engine_fails() {
    let ws = backend();
    ws.autodock()
        .arg("rebuild")
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not running"));
    assert!(!ws.has("Dockerfile"));
}

#[test]
fn test_engine_override_from_config_file() {
    let ws = backend();
    std::fs::write(&ws.config, "engine:\n  binary: autodock-other-engine\n").expect("config");
    let mut cmd = ws.autodock();
    cmd.env_remove("AUTODOCK_ENGINE")
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("autodock-other-engine"));
}

//! Detection scenarios on real project directories.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use autodock_cli::application::ports::RecordStore;
use autodock_cli::application::services::create::create_container;
use autodock_cli::application::services::detect::{ResolvedProject, detect_project};
use autodock_cli::domain::BaseImages;
use autodock_cli::domain::DetectError;
use autodock_cli::domain::record::RECORD_FILE;
use autodock_cli::infra::fs::LocalProject;
use autodock_cli::infra::state::FileRecordStore;
use autodock_common::ProjectType;
use tempfile::TempDir;

use crate::mocks::{FakeEngine, RecordingReporter, ScriptedPrompter};

/// A project directory named `name` inside a fresh temp dir.
fn project(name: &str, files: &[(&str, &str)]) -> (TempDir, PathBuf) {
    let tmp = tempfile::tempdir().expect("tempdir");
    let root = tmp.path().join(name);
    for (rel, content) in files {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        std::fs::write(path, content).expect("write");
    }
    std::fs::create_dir_all(&root).expect("mkdir");
    (tmp, root)
}

fn detect(root: &Path, prompter: &ScriptedPrompter) -> anyhow::Result<ResolvedProject> {
    let project = LocalProject::open(root).expect("open");
    detect_project(&project, root, None, prompter, &RecordingReporter::default())
}

#[test]
fn env_port_and_manifest_main_win() {
    let (_tmp, root) = project(
        "shop",
        &[
            (".env", "PORT=8080\n"),
            ("package.json", r#"{"main":"server.js","scripts":{"start":"node index.js --port 4000"}}"#),
            ("server.js", "const app = require('express')();\napp.listen(3000);\n"),
            ("index.js", "require('./server');\n"),
        ],
    );
    let got = detect(&root, &ScriptedPrompter::non_interactive()).expect("detect");
    assert_eq!(got.project_type, ProjectType::BackendRuntime);
    assert_eq!(got.port.get(), 8080);
    assert_eq!(got.entry.as_deref(), Some("server.js"));
    assert_eq!(got.name, "autodock-shop");
}

#[test]
fn flask_app_is_a_scripting_app() {
    let (_tmp, root) = project(
        "inventory",
        &[
            ("requirements.txt", "flask==3.0\n"),
            (
                "app.py",
                "from flask import Flask\napp = Flask(__name__)\n\nif __name__ == '__main__':\n    app.run(host='0.0.0.0', port=5000)\n",
            ),
        ],
    );
    let got = detect(&root, &ScriptedPrompter::non_interactive()).expect("detect");
    assert_eq!(got.project_type, ProjectType::ScriptingApp);
    assert_eq!(got.entry.as_deref(), Some("app.py"));
    assert_eq!(got.port.get(), 5000);
    assert!(!got.datastore);
}

#[test]
fn nested_main_is_accepted() {
    let (_tmp, root) = project(
        "api",
        &[
            ("package.json", r#"{"main":"src/index.js"}"#),
            ("src/index.js", "server.listen(7000)\n"),
            (".env", "export PORT=\"7100\"\n"),
        ],
    );
    let got = detect(&root, &ScriptedPrompter::non_interactive()).expect("detect");
    assert_eq!(got.entry.as_deref(), Some("src/index.js"));
    assert_eq!(got.port.get(), 7100);
}

#[test]
fn vite_frontend_defaults_to_5173() {
    let (_tmp, root) = project(
        "dashboard",
        &[
            ("package.json", r#"{"devDependencies":{"vite":"5","react":"18"}}"#),
            ("vite.config.js", "export default {}\n"),
        ],
    );
    let got = detect(&root, &ScriptedPrompter::non_interactive()).expect("detect");
    assert_eq!(got.project_type, ProjectType::FrontendAssets);
    assert_eq!(got.port.get(), 5173);
    assert!(got.entry.is_none());
}

#[test]
fn next_app_defaults_to_3000() {
    let (_tmp, root) = project(
        "storefront",
        &[
            ("package.json", r#"{"dependencies":{"next":"14","react":"18"}}"#),
            ("next.config.js", "module.exports = {}\n"),
        ],
    );
    let got = detect(&root, &ScriptedPrompter::non_interactive()).expect("detect");
    assert_eq!(got.project_type, ProjectType::FullstackFramework);
    assert_eq!(got.port.get(), 3000);
}

#[test]
fn empty_directory_cannot_be_classified() {
    let (_tmp, root) = project("notes", &[("README.md", "# notes\n")]);
    let err = detect(&root, &ScriptedPrompter::non_interactive()).unwrap_err();
    assert_eq!(
        err.downcast_ref::<DetectError>(),
        Some(&DetectError::ClassificationFailed)
    );
}

#[test]
fn reserved_port_is_rejected_and_asked_again() {
    let (_tmp, root) = project(
        "worker",
        &[("package.json", r#"{"main":"worker.js"}"#), ("worker.js", "run();\n")],
    );
    let prompter = ScriptedPrompter::answering(&["443", "8080"]);
    let got = detect(&root, &prompter).expect("detect");
    assert_eq!(got.port.get(), 8080);
    assert_eq!(prompter.asked(), 2);
}

#[test]
fn three_bad_answers_are_fatal() {
    let (_tmp, root) = project(
        "worker",
        &[("package.json", r#"{"main":"worker.js"}"#), ("worker.js", "run();\n")],
    );
    let prompter = ScriptedPrompter::answering(&["80", "abc", "65535", "8080"]);
    let err = detect(&root, &prompter).unwrap_err();
    assert_eq!(
        err.downcast_ref::<DetectError>(),
        Some(&DetectError::InvalidPort("65535".to_string()))
    );
    assert_eq!(prompter.asked(), 3);
}

#[test]
fn missing_port_without_a_terminal_is_fatal() {
    let (_tmp, root) = project(
        "worker",
        &[("package.json", r#"{"main":"worker.js"}"#), ("worker.js", "run();\n")],
    );
    let err = detect(&root, &ScriptedPrompter::non_interactive()).unwrap_err();
    assert_eq!(err.downcast_ref::<DetectError>(), Some(&DetectError::PortUnresolved));
}

#[test]
fn prompted_entry_must_exist() {
    let (_tmp, root) = project(
        "bot",
        &[(".env", "PORT=4000\n"), ("package.json", r#"{"name":"bot"}"#), ("lib/bot.js", "")],
    );

    let err = detect(&root, &ScriptedPrompter::answering(&["missing.js"])).unwrap_err();
    assert_eq!(
        err.downcast_ref::<DetectError>(),
        Some(&DetectError::EntryNotFound("missing.js".to_string()))
    );

    let got = detect(&root, &ScriptedPrompter::answering(&["./lib/bot.js"])).expect("detect");
    assert_eq!(got.entry.as_deref(), Some("lib/bot.js"));
}

#[tokio::test]
async fn create_leaves_descriptor_and_record_on_disk() {
    let (_tmp, root) = project(
        "shop",
        &[
            ("package.json", r#"{"main":"server.js"}"#),
            ("server.js", "const PORT = process.env.PORT || 4000;\napp.listen(PORT);\n"),
            ("Dockerfile", "FROM scratch\n"),
        ],
    );
    let project = LocalProject::open(&root).expect("open");
    let store = FileRecordStore::for_project(&root);
    let engine = FakeEngine::new();

    let outcome = create_container(
        &engine,
        &store,
        &project,
        &ScriptedPrompter::non_interactive(),
        &RecordingReporter::default(),
        &BaseImages::default(),
    )
    .await
    .expect("create");

    let descriptor = std::fs::read_to_string(root.join("Dockerfile")).expect("descriptor");
    assert!(descriptor.starts_with("FROM node:18-alpine"));
    assert!(descriptor.contains("EXPOSE 4000"));

    let record_text = std::fs::read_to_string(root.join(RECORD_FILE)).expect("record");
    assert!(record_text.contains("NAME=autodock-shop"));
    assert!(record_text.contains("PORT=4000"));

    let loaded = store.load().await.expect("load").expect("record");
    assert_eq!(loaded.name, outcome.deployment.record.name);
    assert_eq!(loaded.project_type, ProjectType::BackendRuntime);
}

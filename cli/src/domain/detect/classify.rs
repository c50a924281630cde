//! Project-type classification.
//!
//! Declarative markers (config file names, dependency names) are checked
//! before best-effort code-pattern scans, and the first rule that fires wins.

use autodock_common::ProjectType;

use super::signals::{PYTHON_REQUIREMENTS, SignalBag};

/// Config files that mark a Next.js project.
pub const META_FRAMEWORK_CONFIGS: &[&str] = &["next.config.js", "next.config.mjs", "next.config.ts"];

/// Manifest dependency names that mark a Next.js project.
pub const META_FRAMEWORK_DEPS: &[&str] = &[r#""next""#];

/// Frontend build tools; any of these classifies without a server scan.
pub const BUILD_TOOL_MARKERS: &[&str] = &[r#""react-scripts""#, r#""vite""#, r#""@vitejs/"#];

/// UI library that only counts when no server code is present.
pub const UI_LIBRARY_MARKER: &str = r#""react""#;

/// Code patterns that reveal a listening HTTP server.
pub const SERVER_PATTERNS: &[&str] = &[
    "express()",
    "app.listen(",
    "server.listen(",
    "createServer",
    "fastify(",
    "koa()",
    "hapi.server(",
];

/// Extensions scanned for server code.
pub const SCRIPT_EXTENSIONS: &[&str] = &["js", "ts"];

/// Classify the project. Returns `ProjectType::Unknown` when nothing matches.
#[must_use]
pub fn classify(signals: &SignalBag<'_>) -> ProjectType {
    if signals.has_manifest() {
        let manifest = signals.manifest();
        if is_meta_framework(signals, &manifest) {
            return ProjectType::FullstackFramework;
        }
        if is_frontend(signals, &manifest) {
            return ProjectType::FrontendAssets;
        }
        return ProjectType::BackendRuntime;
    }
    if signals.exists(PYTHON_REQUIREMENTS) {
        return ProjectType::ScriptingApp;
    }
    ProjectType::Unknown
}

fn is_meta_framework(signals: &SignalBag<'_>, manifest: &str) -> bool {
    META_FRAMEWORK_CONFIGS.iter().any(|f| signals.exists(f))
        || META_FRAMEWORK_DEPS.iter().any(|d| manifest.contains(d))
}

fn is_frontend(signals: &SignalBag<'_>, manifest: &str) -> bool {
    if BUILD_TOOL_MARKERS.iter().any(|m| manifest.contains(m)) {
        return true;
    }
    manifest.contains(UI_LIBRARY_MARKER) && !has_server_code(signals)
}

/// Whether any top-level script contains a server-listener pattern.
#[must_use]
pub fn has_server_code(signals: &SignalBag<'_>) -> bool {
    signals.sources_with(SCRIPT_EXTENSIONS).into_iter().any(|file| {
        let content = signals.text(file);
        SERVER_PATTERNS.iter().any(|p| content.contains(p))
    })
}

/// Whether the frontend is built with Vite (affects the default port).
#[must_use]
pub fn uses_vite(signals: &SignalBag<'_>) -> bool {
    let manifest = signals.manifest();
    manifest.contains(r#""vite""#) || manifest.contains(r#""@vitejs/"#)
}

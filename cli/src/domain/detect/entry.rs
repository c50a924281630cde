//! Layered entry-file resolution for runtime project types.

use std::sync::LazyLock;

use autodock_common::ProjectType;
use regex::Regex;

use super::signals::{SignalBag, normalize};
use super::{Strategy, first_match};

/// Conventional Node.js entry files, highest priority first.
pub const NODE_CONVENTIONAL: &[&str] = &[
    "server.js",
    "app.js",
    "index.js",
    "main.js",
    "server.ts",
    "app.ts",
    "index.ts",
];

/// Conventional Python entry files, highest priority first.
pub const PYTHON_CONVENTIONAL: &[&str] =
    &["app.py", "main.py", "server.py", "run.py", "wsgi.py", "manage.py"];

const NODE_ENTRY_PATTERNS: &[&str] = &["app.listen(", "server.listen(", "express()", "createServer"];

const PYTHON_ENTRY_PATTERNS: &[&str] =
    &["Flask(", "FastAPI(", "from django", "app.run(", "uvicorn.run("];

static START_SCRIPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"\b(?:node|nodemon|ts-node|tsx)\s+(?:-{1,2}[\w-]+(?:=\S+)?\s+)*([\w./-]+\.(?:js|mjs|cjs|ts))\b")
        .expect("valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntryLayer {
    ManifestMain,
    StartScript,
    Conventional,
    PatternScan,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryCandidate {
    pub path: String,
    pub layer: EntryLayer,
}

const ENTRY_STRATEGIES: &[(EntryLayer, Strategy<String>)] = &[
    (EntryLayer::ManifestMain, from_manifest_main),
    (EntryLayer::StartScript, from_start_script),
    (EntryLayer::Conventional, from_conventional_names),
    (EntryLayer::PatternScan, from_pattern_scan),
];

/// Resolve the entry file. Always `None` for types that do not need one.
#[must_use]
pub fn resolve_entry(signals: &SignalBag<'_>, project_type: ProjectType) -> Option<EntryCandidate> {
    if !project_type.needs_entry_file() {
        return None;
    }
    first_match(ENTRY_STRATEGIES, signals, project_type)
        .map(|(layer, path)| EntryCandidate { path, layer })
}

fn from_manifest_main(signals: &SignalBag<'_>, project_type: ProjectType) -> Option<String> {
    if project_type != ProjectType::BackendRuntime {
        return None;
    }
    let manifest = signals.manifest_json()?;
    let main = normalize(manifest.get("main")?.as_str()?);
    signals.exists(main).then(|| main.to_string())
}

fn from_start_script(signals: &SignalBag<'_>, project_type: ProjectType) -> Option<String> {
    if project_type != ProjectType::BackendRuntime {
        return None;
    }
    let manifest = signals.manifest_json()?;
    let start = manifest.get("scripts")?.get("start")?.as_str()?;
    START_SCRIPT_RE
        .captures_iter(start)
        .map(|cap| normalize(cap.get(1).map_or("", |m| m.as_str())).to_string())
        .find(|file| signals.exists(file))
}

fn from_conventional_names(signals: &SignalBag<'_>, project_type: ProjectType) -> Option<String> {
    conventional_names(project_type)
        .iter()
        .find(|name| signals.exists(name))
        .map(|name| (*name).to_string())
}

fn from_pattern_scan(signals: &SignalBag<'_>, project_type: ProjectType) -> Option<String> {
    let (exts, patterns): (&[&str], &[&str]) = match project_type {
        ProjectType::BackendRuntime => (&["js", "ts"], NODE_ENTRY_PATTERNS),
        ProjectType::ScriptingApp => (&["py"], PYTHON_ENTRY_PATTERNS),
        _ => return None,
    };
    signals
        .sources_with(exts)
        .into_iter()
        .find(|file| {
            let content = signals.text(file);
            patterns.iter().any(|p| content.contains(p))
        })
        .map(str::to_string)
}

fn conventional_names(project_type: ProjectType) -> &'static [&'static str] {
    match project_type {
        ProjectType::BackendRuntime => NODE_CONVENTIONAL,
        ProjectType::ScriptingApp => PYTHON_CONVENTIONAL,
        _ => &[],
    }
}

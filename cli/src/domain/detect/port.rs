//! Layered port resolution.
//!
//! Each layer is an independent strategy; `resolve_port` returns the first
//! candidate that passes [`Port::parse`]. Invalid candidates are skipped and
//! the scan continues.

use std::fmt;
use std::sync::LazyLock;

use autodock_common::ProjectType;
use regex::Regex;

use super::classify::uses_vite;
use super::signals::SignalBag;
use super::{Strategy, first_match};

/// Well-known and datastore ports never assigned automatically.
pub const FORBIDDEN_PORTS: &[u16] = &[20, 21, 22, 23, 25, 53, 80, 443, 3306, 5432, 27017];

/// Default port of the Vite dev/preview server.
pub const VITE_DEFAULT_PORT: u16 = 5173;
/// Default port of CRA and Next.js.
pub const GENERIC_FRONTEND_PORT: u16 = 3000;

/// Source extensions scanned for listener calls.
pub const PORT_SOURCE_EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "ts", "py"];

static LISTEN_ARG_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"\blisten\(\s*([^,)]*)").expect("valid regex")
});

static KEYWORD_PORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"[(,]\s*port\s*=\s*([A-Za-z_][A-Za-z0-9_]*|\d+)").expect("valid regex")
});

static SCRIPT_PORT_FLAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r#"--port(?:\s+|=)["']?(\d+)"#).expect("valid regex")
});

static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("valid regex")
});

/// A port that passed the validity predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Port(u16);

impl Port {
    /// Parse and validate a port string.
    ///
    /// Valid means: all ASCII digits, strictly between 1024 and 65535, and
    /// not in [`FORBIDDEN_PORTS`].
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let value: u32 = raw.parse().ok()?;
        Self::new(u16::try_from(value).ok()?)
    }

    /// Validate a numeric port.
    #[must_use]
    pub fn new(value: u16) -> Option<Self> {
        (value > 1024 && value < 65535 && !FORBIDDEN_PORTS.contains(&value)).then_some(Self(value))
    }

    #[must_use]
    pub fn get(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a raw port string passes the global validity predicate.
#[must_use]
pub fn is_valid_port(raw: &str) -> bool {
    Port::parse(raw).is_some()
}

/// Where a port candidate came from, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PortLayer {
    EnvFile,
    ListenLiteral,
    ListenVariable,
    KeywordArgument,
    ManifestScript,
    TypeDefault,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortCandidate {
    pub port: Port,
    pub layer: PortLayer,
}

const PORT_STRATEGIES: &[(PortLayer, Strategy<Port>)] = &[
    (PortLayer::EnvFile, from_env_file),
    (PortLayer::ListenLiteral, from_listen_literal),
    (PortLayer::ListenVariable, from_listen_variable),
    (PortLayer::KeywordArgument, from_keyword_argument),
    (PortLayer::ManifestScript, from_manifest_script),
    (PortLayer::TypeDefault, from_type_default),
];

/// Resolve the port, or `None` when every layer is exhausted.
#[must_use]
pub fn resolve_port(signals: &SignalBag<'_>, project_type: ProjectType) -> Option<PortCandidate> {
    first_match(PORT_STRATEGIES, signals, project_type)
        .map(|(layer, port)| PortCandidate { port, layer })
}

// ── Layers ───────────────────────────────────────────────────────────────────

fn from_env_file(signals: &SignalBag<'_>, _: ProjectType) -> Option<Port> {
    signals
        .env_file()
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            let line = line.strip_prefix("export ").unwrap_or(line).trim_start();
            line.strip_prefix("PORT=")
        })
        .find_map(|value| Port::parse(unquote(strip_comment(value))))
}

fn from_listen_literal(signals: &SignalBag<'_>, _: ProjectType) -> Option<Port> {
    for file in signals.sources_with(PORT_SOURCE_EXTENSIONS) {
        let content = signals.text(file);
        for cap in LISTEN_ARG_RE.captures_iter(&content) {
            if let Some(port) = literal_value(&cap[1]) {
                return Some(port);
            }
        }
    }
    None
}

fn from_listen_variable(signals: &SignalBag<'_>, _: ProjectType) -> Option<Port> {
    for file in signals.sources_with(PORT_SOURCE_EXTENSIONS) {
        let content = signals.text(file);
        for cap in LISTEN_ARG_RE.captures_iter(&content) {
            if let Some(port) = lookup_assignment(&content, cap[1].trim()) {
                return Some(port);
            }
        }
    }
    None
}

fn from_keyword_argument(signals: &SignalBag<'_>, _: ProjectType) -> Option<Port> {
    for file in signals.sources_with(&["py"]) {
        let content = signals.text(file);
        for cap in KEYWORD_PORT_RE.captures_iter(&content) {
            let value = &cap[1];
            let port = literal_value(value).or_else(|| lookup_assignment(&content, value));
            if port.is_some() {
                return port;
            }
        }
    }
    None
}

fn from_manifest_script(signals: &SignalBag<'_>, _: ProjectType) -> Option<Port> {
    if !signals.has_manifest() {
        return None;
    }
    let Some(manifest) = signals.manifest_json() else {
        return first_flag_port(&signals.manifest());
    };
    let scripts = manifest.get("scripts")?.as_object()?;
    let mut names: Vec<&String> = scripts.keys().collect();
    names.sort_by_key(|name| (script_rank(name), name.as_str()));
    names
        .into_iter()
        .filter_map(|name| scripts.get(name)?.as_str())
        .find_map(first_flag_port)
}

fn from_type_default(signals: &SignalBag<'_>, project_type: ProjectType) -> Option<Port> {
    match project_type {
        ProjectType::FrontendAssets if uses_vite(signals) => Port::new(VITE_DEFAULT_PORT),
        ProjectType::FrontendAssets | ProjectType::FullstackFramework => {
            Port::new(GENERIC_FRONTEND_PORT)
        }
        ProjectType::BackendRuntime | ProjectType::ScriptingApp | ProjectType::Unknown => None,
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn script_rank(name: &str) -> u8 {
    match name {
        "start" => 0,
        "dev" => 1,
        _ => 2,
    }
}

fn first_flag_port(script: &str) -> Option<Port> {
    SCRIPT_PORT_FLAG_RE
        .captures_iter(script)
        .find_map(|cap| Port::parse(&cap[1]))
}

/// A literal number, or the literal fallback of `x || 3000` / `x ?? 3000`.
fn literal_value(expr: &str) -> Option<Port> {
    let expr = unquote(expr.trim());
    if let Some(port) = Port::parse(expr) {
        return Some(port);
    }
    let fallback = expr.rsplit(['|', '?']).next()?;
    if fallback.len() == expr.len() {
        return None;
    }
    Port::parse(unquote(fallback.trim().trim_end_matches(')')))
}

/// Single-hop lookup of `name`'s assignment in the same file.
fn lookup_assignment(content: &str, name: &str) -> Option<Port> {
    if !IDENTIFIER_RE.is_match(name) {
        return None;
    }
    let pattern = format!(
        r"(?m)^\s*(?:export\s+)?(?:(?:const|let|var)\s+)?{}\s*=([^=\n][^\n]*)$",
        regex::escape(name)
    );
    let re = Regex::new(&pattern).ok()?;
    re.captures_iter(content).find_map(|cap| {
        let value = strip_comment(&cap[1]);
        literal_value(value.trim().trim_end_matches(';'))
    })
}

fn strip_comment(value: &str) -> &str {
    let end = [value.find(" #"), value.find(" //")]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(value.len());
    value[..end].trim()
}

fn unquote(value: &str) -> &str {
    value.trim().trim_matches(|c| c == '"' || c == '\'' || c == '`')
}

//! Container naming rules.

use std::path::Path;

/// Prefix of every derived container name.
pub const NAME_PREFIX: &str = "autodock-";

/// Name used when the directory name is too short or too generic.
pub const FALLBACK_NAME: &str = "autodock-app";

const GENERIC_DIR_NAMES: &[&str] = &["src", "app"];

/// Derive the default container name from the project directory's basename.
#[must_use]
pub fn derive_default_name(project_dir: &Path) -> String {
    let base = project_dir
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let mut slug = String::with_capacity(base.len());
    for c in base.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.len() < 3 || GENERIC_DIR_NAMES.contains(&slug) {
        return FALLBACK_NAME.to_string();
    }
    format!("{NAME_PREFIX}{slug}")
}

/// Pick the container a verb targets: explicit > recorded > derived.
#[must_use]
pub fn resolve_name(explicit: Option<&str>, recorded: Option<&str>, project_dir: &Path) -> String {
    explicit
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .or(recorded)
        .map_or_else(|| derive_default_name(project_dir), str::to_string)
}

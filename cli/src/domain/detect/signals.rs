//! Lazily populated view over the project files the resolvers read.
//!
//! Absence is a signal: a missing or unreadable file reads as empty text and
//! is never an error.

use std::cell::{OnceCell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

/// Dependency manifest of Node.js projects.
pub const MANIFEST: &str = "package.json";
/// Environment-declaration file.
pub const ENV_FILE: &str = ".env";
/// Dependency list of Python projects.
pub const PYTHON_REQUIREMENTS: &str = "requirements.txt";

/// Raw project access the signal bag is built on.
///
/// Implementations must stay inside the project root and treat absence as
/// `None`/`false` rather than an error.
pub trait ProjectReader {
    /// Names of the regular files directly under the project root.
    fn list_files(&self) -> Vec<String>;
    /// Bounded text content of a file relative to the root.
    fn read(&self, rel: &str) -> Option<String>;
    /// Whether a regular file exists at `rel` (nested paths allowed).
    fn is_file(&self, rel: &str) -> bool;
}

/// Read-only, lazily populated signal bag shared by every resolver.
pub struct SignalBag<'a> {
    reader: &'a dyn ProjectReader,
    listing: OnceCell<Vec<String>>,
    contents: RefCell<BTreeMap<String, Rc<str>>>,
}

impl<'a> SignalBag<'a> {
    #[must_use]
    pub fn new(reader: &'a dyn ProjectReader) -> Self {
        Self {
            reader,
            listing: OnceCell::new(),
            contents: RefCell::new(BTreeMap::new()),
        }
    }

    /// Top-level file names in lexicographic order.
    pub fn files(&self) -> &[String] {
        self.listing.get_or_init(|| {
            let mut files = self.reader.list_files();
            files.sort();
            files.dedup();
            files
        })
    }

    /// Whether a top-level file or nested relative path exists.
    pub fn exists(&self, rel: &str) -> bool {
        let rel = normalize(rel);
        if rel.is_empty() {
            return false;
        }
        if self.files().iter().any(|f| f == rel) {
            return true;
        }
        rel.contains('/') && self.reader.is_file(rel)
    }

    /// Text of `rel`, empty when the file is absent or unreadable.
    pub fn text(&self, rel: &str) -> Rc<str> {
        if let Some(hit) = self.contents.borrow().get(rel) {
            return Rc::clone(hit);
        }
        let content: Rc<str> = self.reader.read(rel).unwrap_or_default().into();
        self.contents
            .borrow_mut()
            .insert(rel.to_string(), Rc::clone(&content));
        content
    }

    pub fn has_manifest(&self) -> bool {
        self.exists(MANIFEST)
    }

    pub fn manifest(&self) -> Rc<str> {
        self.text(MANIFEST)
    }

    pub fn env_file(&self) -> Rc<str> {
        self.text(ENV_FILE)
    }

    /// Top-level files whose extension is one of `exts`, in lexicographic order.
    pub fn sources_with(&self, exts: &[&str]) -> Vec<&str> {
        self.files()
            .iter()
            .filter(|name| {
                name.rsplit_once('.')
                    .is_some_and(|(stem, ext)| !stem.is_empty() && exts.contains(&ext))
            })
            .map(String::as_str)
            .collect()
    }

    /// The manifest parsed as JSON, `None` when absent or invalid.
    pub fn manifest_json(&self) -> Option<serde_json::Value> {
        if !self.has_manifest() {
            return None;
        }
        serde_json::from_str(&self.manifest()).ok()
    }
}

/// Strip a leading `./` so `./server.js` and `server.js` name the same file.
#[must_use]
pub fn normalize(rel: &str) -> &str {
    let mut rel = rel.trim();
    while let Some(rest) = rel.strip_prefix("./") {
        rel = rest;
    }
    rel
}

/// Fixed in-memory project, for analysing content that is not on disk.
#[derive(Debug, Default, Clone)]
pub struct StaticProject {
    files: BTreeMap<String, String>,
}

impl StaticProject {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, builder style.
    #[must_use]
    pub fn with(mut self, rel: &str, content: &str) -> Self {
        self.files.insert(rel.to_string(), content.to_string());
        self
    }
}

impl ProjectReader for StaticProject {
    fn list_files(&self) -> Vec<String> {
        self.files
            .keys()
            .filter(|k| !k.contains('/'))
            .cloned()
            .collect()
    }

    fn read(&self, rel: &str) -> Option<String> {
        self.files.get(rel).cloned()
    }

    fn is_file(&self, rel: &str) -> bool {
        self.files.contains_key(rel)
    }
}

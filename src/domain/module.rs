//! Module domain types
//!
//! A module is one directory under the source root. The aggregate module is the one
//! whose immediate children are packaged on their own.

use std::path::PathBuf;

/// Directory entries never treated as modules or children
const IGNORED: &[&str] = &["__pycache__"];

/// A child entry of the aggregate module directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleChild {
    /// Packaging name, e.g. `sub1` for `sub1.py`
    pub name: String,

    /// File or directory name on disk
    pub entry: String,

    /// Absolute path to the entry
    pub path: PathBuf,
}

impl ModuleChild {
    pub fn new(entry: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        let entry = entry.into();
        let name = entry.strip_suffix(".py").unwrap_or(&entry).to_string();
        Self {
            name,
            entry,
            path: path.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleKind {
    Ordinary,
    Aggregate { children: Vec<ModuleChild> },
}

/// A source module directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub name: String,
    pub path: PathBuf,
    pub kind: ModuleKind,
}

impl Module {
    pub fn ordinary(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: ModuleKind::Ordinary,
        }
    }

    pub fn aggregate(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        children: Vec<ModuleChild>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: ModuleKind::Aggregate { children },
        }
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self.kind, ModuleKind::Aggregate { .. })
    }
}

/// Whether a directory entry should be skipped during discovery
pub fn is_ignored(name: &str) -> bool {
    name.starts_with('.') || IGNORED.contains(&name)
}

//! Module discovery
//!
//! Lists the module directories under the source root. The directory named like the
//! aggregate becomes an aggregate module with its child entries enumerated.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::module::is_ignored;
use crate::domain::{Module, ModuleChild};
use crate::error::{Result, source_root_not_found};

/// Sorted `(name, path)` pairs of a directory's entries, skipping ignored names
fn sorted_entries(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            tracing::warn!(path = %entry.path().display(), "skipping non UTF-8 entry");
            continue;
        };
        if is_ignored(&name) {
            continue;
        }
        entries.push((name, entry.path()));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(entries)
}

/// Discover modules under `source_root` in name order
pub fn discover_modules(source_root: &Path, aggregate: &str) -> Result<Vec<Module>> {
    if !source_root.is_dir() {
        return Err(source_root_not_found(source_root));
    }

    let mut modules = Vec::new();
    for (name, path) in sorted_entries(source_root)? {
        if !path.is_dir() {
            continue;
        }

        if name == aggregate {
            let children = sorted_entries(&path)?
                .into_iter()
                .map(|(entry, child_path)| ModuleChild::new(entry, child_path))
                .collect();
            modules.push(Module::aggregate(name, path, children));
        } else {
            modules.push(Module::ordinary(name, path));
        }
    }

    tracing::debug!(
        root = %source_root.display(),
        count = modules.len(),
        "discovered modules"
    );
    Ok(modules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ModuleKind;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_discover_sorted_with_aggregate() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(&root.join("beta/beta.py"));
        touch(&root.join("alpha/alpha.py"));
        touch(&root.join("widgets/__init__.py"));
        touch(&root.join("widgets/sub2/impl.py"));
        touch(&root.join("widgets/sub1.py"));
        touch(&root.join("stray.py"));

        let modules = discover_modules(root, "widgets").unwrap();
        let names: Vec<_> = modules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["alpha", "beta", "widgets"]);

        let ModuleKind::Aggregate { children } = &modules[2].kind else {
            panic!("widgets should be an aggregate");
        };
        let entries: Vec<_> = children.iter().map(|c| c.entry.as_str()).collect();
        assert_eq!(entries, ["__init__.py", "sub1.py", "sub2"]);
    }

    #[test]
    fn test_discover_skips_hidden_and_pycache() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(&root.join(".git/HEAD"));
        touch(&root.join("__pycache__/x.pyc"));
        touch(&root.join("alpha/alpha.py"));
        touch(&root.join("widgets/__pycache__/y.pyc"));
        touch(&root.join("widgets/__init__.py"));

        let modules = discover_modules(root, "widgets").unwrap();
        assert_eq!(modules.len(), 2);
        let ModuleKind::Aggregate { children } = &modules[1].kind else {
            panic!("widgets should be an aggregate");
        };
        assert_eq!(children.len(), 1);
    }

    #[test]
    fn test_missing_source_root() {
        let temp = TempDir::new().unwrap();
        let err = discover_modules(&temp.path().join("missing"), "widgets").unwrap_err();
        assert!(matches!(
            err,
            crate::error::FanoutError::SourceRootNotFound { .. }
        ));
    }

    #[test]
    fn test_no_aggregate_present() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("alpha/alpha.py"));
        let modules = discover_modules(temp.path(), "widgets").unwrap();
        assert!(modules.iter().all(|m| !m.is_aggregate()));
    }
}

//! Common file system operations used while staging packages

use std::fs;
use std::path::{Path, PathBuf};

#[derive(Default, Clone)]
pub struct CopyOptions {
    pub exclude: Vec<String>,
}

impl CopyOptions {
    /// Skip VCS metadata and Python bytecode caches
    pub fn staging() -> Self {
        Self {
            exclude: vec![".git".to_string(), "__pycache__".to_string()],
        }
    }

    fn excludes(&self, name: &std::ffi::OsStr) -> bool {
        self.exclude
            .iter()
            .any(|excluded| name.to_str() == Some(excluded.as_str()))
    }
}

/// Copy a directory recursively with options
///
/// Entries are visited in name order so the result does not depend on directory
/// iteration order.
pub fn copy_dir_recursive<P1, P2>(src: P1, dst: P2, options: &CopyOptions) -> std::io::Result<()>
where
    P1: AsRef<Path>,
    P2: AsRef<Path>,
{
    let src_ref = src.as_ref();
    let dst_ref = dst.as_ref();

    if !dst_ref.exists() {
        fs::create_dir_all(dst_ref)?;
    }

    let mut entries = fs::read_dir(src_ref)?.collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(fs::DirEntry::file_name);

    for entry in entries {
        let entry_path = entry.path();
        let file_name = entry.file_name();

        if options.excludes(&file_name) {
            continue;
        }

        let dst_path = dst_ref.join(&file_name);

        if entry_path.is_dir() {
            copy_dir_recursive(&entry_path, &dst_path, options)?;
        } else {
            tracing::trace!(from = %entry_path.display(), to = %dst_path.display(), "copy");
            fs::copy(&entry_path, &dst_path)?;
        }
    }

    Ok(())
}

/// Copy a file or a directory into `into_dir`, keeping its name
///
/// Returns the path of the copy.
pub fn copy_entry(from: &Path, into_dir: &Path, options: &CopyOptions) -> std::io::Result<PathBuf> {
    let name = from.file_name().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("'{}' has no file name", from.display()),
        )
    })?;
    let target = into_dir.join(name);

    fs::create_dir_all(into_dir)?;
    if from.is_dir() {
        copy_dir_recursive(from, &target, options)?;
    } else {
        fs::copy(from, &target)?;
    }
    Ok(target)
}

/// Entries of `dir` whose file name starts with `prefix`, sorted by name
///
/// A missing directory yields no entries.
pub fn prefixed_entries(dir: &Path, prefix: &str) -> std::io::Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut matches = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with(prefix))
        {
            matches.push(entry.path());
        }
    }
    matches.sort();
    Ok(matches)
}

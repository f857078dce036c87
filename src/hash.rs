//! BLAKE3 digest of a staged tree
//!
//! Two stagings of an unchanged source tree must produce identical destination trees;
//! the digest makes that observable from the command line.

use std::fs::File;
use std::io;
use std::path::Path;

use blake3::Hasher;
use walkdir::WalkDir;

use crate::error::{Result, dest_root_not_found};

/// Hash prefix for BLAKE3 hashes
pub const HASH_PREFIX: &str = "blake3:";

/// Calculate the BLAKE3 digest of a directory's contents
///
/// Every file is hashed with its relative path, sorted by path. The `.git`
/// directory is skipped so committing the staged tree does not change its digest.
pub fn hash_tree(path: &Path) -> Result<String> {
    if !path.is_dir() {
        return Err(dest_root_not_found(path));
    }

    let mut hasher = Hasher::new();
    let mut files = Vec::new();
    for entry in WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.file_name() != ".git")
    {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_file() {
            files.push(entry);
        }
    }

    files.sort_by(|a, b| a.path().cmp(b.path()));

    for entry in files {
        let file_path = entry.path();

        let relative_path = file_path
            .strip_prefix(path)
            .unwrap_or(file_path)
            .to_string_lossy()
            .replace('\\', "/");
        hasher.update(relative_path.as_bytes());
        hasher.update(b"\0");

        let mut file = File::open(file_path)?;
        io::copy(&mut file, &mut hasher)?;

        hasher.update(b"\0");
    }

    Ok(format!("{}{}", HASH_PREFIX, hasher.finalize().to_hex()))
}

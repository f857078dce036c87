//! Package domain types
//!
//! A package is the unit handed to the external build and upload tools. Each one
//! carries its manifest and everything the stager needs to lay it out on disk.

use std::path::PathBuf;

use crate::manifest::Manifest;

/// Why a package exists
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageRole {
    Ordinary,
    /// Built from the aggregate's sentinel child
    AggregateTop,
    /// Built from any other aggregate child; always requires `parent`
    AggregateChild { parent: String },
}

impl PackageRole {
    pub fn label(&self) -> &'static str {
        match self {
            PackageRole::Ordinary => "module",
            PackageRole::AggregateTop => "aggregate",
            PackageRole::AggregateChild { .. } => "aggregate child",
        }
    }
}

/// Source files copied into a package
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceCopy {
    /// Copy the contents of `from` into the directory `to`
    DirContents { from: PathBuf, to: PathBuf },
    /// Copy the file or directory `from` into the directory `into`, keeping its name
    Entry { from: PathBuf, into: PathBuf },
}

impl SourceCopy {
    pub fn origin(&self) -> &PathBuf {
        match self {
            SourceCopy::DirContents { from, .. } | SourceCopy::Entry { from, .. } => from,
        }
    }
}

/// Where a package's `examples/` content comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExampleSource {
    /// Every entry of `dir` whose file name starts with `prefix`
    Prefixed { dir: PathBuf, prefix: String },
    /// One externally located configuration file; it must exist
    File(PathBuf),
}

/// A planned package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    pub role: PackageRole,
    pub manifest: Manifest,

    /// Package directory under the destination root
    pub dest: PathBuf,

    pub source: SourceCopy,
    pub examples: ExampleSource,

    /// Listed in the bundle manifest
    pub in_bundle: bool,

    /// Handed to the build and upload tools on release
    pub publish: bool,
}

impl Package {
    pub fn examples_dir(&self) -> PathBuf {
        self.dest.join("examples")
    }
}

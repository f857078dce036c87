//! Domain models for fanout
//!
//! This module contains pure domain objects: the modules found in the source tree and
//! the packages planned from them. They are computed fresh on every run.

pub mod module;
pub mod package;

pub use module::{Module, ModuleChild, ModuleKind};
pub use package::{ExampleSource, Package, PackageRole, SourceCopy};

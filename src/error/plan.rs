//! Planning errors

use std::path::Path;

use super::FanoutError;

/// Creates a duplicate package name error
pub fn duplicate_package(name: impl Into<String>) -> FanoutError {
    FanoutError::DuplicatePackage { name: name.into() }
}

/// Creates an error for a package staged below another package's directory
pub fn nested_destination(
    package: impl Into<String>,
    outer: impl Into<String>,
    path: impl AsRef<Path>,
) -> FanoutError {
    FanoutError::NestedDestination {
        package: package.into(),
        outer: outer.into(),
        path: path.as_ref().display().to_string(),
    }
}

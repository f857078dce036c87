//! File system and missing-input errors

use std::path::Path;

use super::FanoutError;

pub fn source_root_not_found(path: impl AsRef<Path>) -> FanoutError {
    FanoutError::SourceRootNotFound {
        path: path.as_ref().display().to_string(),
    }
}

pub fn dest_root_not_found(path: impl AsRef<Path>) -> FanoutError {
    FanoutError::DestRootNotFound {
        path: path.as_ref().display().to_string(),
    }
}

pub fn module_not_found(name: impl Into<String>, path: impl AsRef<Path>) -> FanoutError {
    FanoutError::ModuleNotFound {
        name: name.into(),
        path: path.as_ref().display().to_string(),
    }
}

pub fn readme_not_found(path: impl AsRef<Path>) -> FanoutError {
    FanoutError::ReadmeNotFound {
        path: path.as_ref().display().to_string(),
    }
}

pub fn example_not_found(package: impl Into<String>, path: impl AsRef<Path>) -> FanoutError {
    FanoutError::ExampleNotFound {
        package: package.into(),
        path: path.as_ref().display().to_string(),
    }
}

/// Creates a copy failed error carrying both ends of the copy
pub fn copy_failed(
    from: impl AsRef<Path>,
    to: impl AsRef<Path>,
    reason: impl ToString,
) -> FanoutError {
    FanoutError::CopyFailed {
        from: from.as_ref().display().to_string(),
        to: to.as_ref().display().to_string(),
        reason: reason.to_string(),
    }
}

pub fn write_failed(path: impl AsRef<Path>, reason: impl ToString) -> FanoutError {
    FanoutError::FileWriteFailed {
        path: path.as_ref().display().to_string(),
        reason: reason.to_string(),
    }
}

//! Error types and handling for fanout
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: Configuration errors
//! - [`fs`]: File system and missing-input errors
//! - [`plan`]: Planning errors
//! - [`tool`]: External build/upload tool errors
//! - [`git`]: Git operation errors

pub mod config;
pub mod fs;
pub mod git;
pub mod plan;
pub mod tool;

pub use config::{
    invalid as config_invalid, not_found as config_not_found, parse_failed as config_parse_failed,
    read_failed as config_read_failed,
};
pub use fs::{
    copy_failed, dest_root_not_found, example_not_found, module_not_found, readme_not_found,
    source_root_not_found, write_failed as file_write_failed,
};
pub use git::{
    open_failed as git_open_failed, operation_failed as git_operation_failed, push_failed,
    remote_not_found,
};
pub use plan::{duplicate_package, nested_destination};
pub use tool::{invalid_glob, spawn_failed as tool_spawn_failed, tool_failed};

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for fanout operations
#[derive(Error, Diagnostic, Debug)]
pub enum FanoutError {
    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(fanout::config::not_found),
        help("Create a fanout.yaml in the project root or pass --config <path>")
    )]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(fanout::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(fanout::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(fanout::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    // Missing input
    #[error("Source root not found: {path}")]
    #[diagnostic(
        code(fanout::fs::source_root_not_found),
        help("Check `source_root` in fanout.yaml")
    )]
    SourceRootNotFound { path: String },

    #[error("Destination root not found: {path}")]
    #[diagnostic(
        code(fanout::fs::dest_root_not_found),
        help("Check `dest_root` in fanout.yaml or pass --dest <dir>")
    )]
    DestRootNotFound { path: String },

    #[error("Source for module '{name}' not found: {path}")]
    #[diagnostic(code(fanout::fs::module_not_found))]
    ModuleNotFound { name: String, path: String },

    #[error("README not found: {path}")]
    #[diagnostic(
        code(fanout::fs::readme_not_found),
        help("Every staged package receives a copy of the project README; check `readme` in fanout.yaml")
    )]
    ReadmeNotFound { path: String },

    #[error("Example file for package '{package}' not found: {path}")]
    #[diagnostic(
        code(fanout::fs::example_not_found),
        help("Add an entry for this child under `aggregate.children` or fix `aggregate.fallback`")
    )]
    ExampleNotFound { package: String, path: String },

    #[error("Failed to copy '{from}' to '{to}': {reason}")]
    #[diagnostic(code(fanout::fs::copy_failed))]
    CopyFailed {
        from: String,
        to: String,
        reason: String,
    },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(fanout::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(fanout::fs::io_error))]
    IoError { message: String },

    // Planning errors
    #[error("Package name '{name}' is produced more than once")]
    #[diagnostic(
        code(fanout::plan::duplicate_package),
        help("Rename the module or the bundle so every package name is unique")
    )]
    DuplicatePackage { name: String },

    #[error("Package '{package}' would be staged inside package '{outer}': {path}")]
    #[diagnostic(
        code(fanout::plan::nested_destination),
        help("Give every package its own directory below dest_root")
    )]
    NestedDestination {
        package: String,
        outer: String,
        path: String,
    },

    // External tool errors
    #[error("Failed to run '{program}': {reason}")]
    #[diagnostic(
        code(fanout::tool::spawn_failed),
        help("Check that the tool is installed and on PATH, or adjust `tools` in fanout.yaml")
    )]
    ToolSpawnFailed { program: String, reason: String },

    #[error("'{program}' failed for package '{package}' with {status}")]
    #[diagnostic(code(fanout::tool::failed))]
    ToolFailed {
        program: String,
        package: String,
        status: String,
    },

    #[error("Invalid artifact pattern '{pattern}': {reason}")]
    #[diagnostic(code(fanout::tool::invalid_glob))]
    InvalidGlob { pattern: String, reason: String },

    // Git errors
    #[error("Git operation failed: {message}")]
    #[diagnostic(code(fanout::git::operation_failed))]
    GitOperationFailed { message: String },

    #[error("Failed to open repository at '{path}': {reason}")]
    #[diagnostic(
        code(fanout::git::open_failed),
        help("The destination root must live inside a git repository to commit and push")
    )]
    GitOpenFailed { path: String, reason: String },

    #[error("Remote '{remote}' not found")]
    #[diagnostic(
        code(fanout::git::remote_not_found),
        help("Add the remote with 'git remote add' or set `git.remote` in fanout.yaml")
    )]
    RemoteNotFound { remote: String },

    #[error("Failed to push to '{remote}': {reason}")]
    #[diagnostic(code(fanout::git::push_failed))]
    GitPushFailed { remote: String, reason: String },

    // Prompt errors
    #[error("Cannot prompt for a commit message: {message}")]
    #[diagnostic(
        code(fanout::prompt::failed),
        help("Pass --message <text> or --no-commit when running without a terminal")
    )]
    PromptFailed { message: String },
}

impl From<std::io::Error> for FanoutError {
    fn from(err: std::io::Error) -> Self {
        FanoutError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for FanoutError {
    fn from(err: serde_yaml::Error) -> Self {
        FanoutError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for FanoutError {
    fn from(err: serde_json::Error) -> Self {
        FanoutError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<git2::Error> for FanoutError {
    fn from(err: git2::Error) -> Self {
        FanoutError::GitOperationFailed {
            message: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for FanoutError {
    fn from(err: inquire::InquireError) -> Self {
        FanoutError::PromptFailed {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, FanoutError>;

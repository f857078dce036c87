//! External tool errors

use super::FanoutError;

/// Creates an error for a tool that could not be started at all
pub fn spawn_failed(program: impl Into<String>, reason: impl ToString) -> FanoutError {
    FanoutError::ToolSpawnFailed {
        program: program.into(),
        reason: reason.to_string(),
    }
}

/// Creates an error for a tool that ran and exited unsuccessfully
pub fn tool_failed(
    program: impl Into<String>,
    package: impl Into<String>,
    status: impl ToString,
) -> FanoutError {
    FanoutError::ToolFailed {
        program: program.into(),
        package: package.into(),
        status: status.to_string(),
    }
}

pub fn invalid_glob(pattern: impl Into<String>, reason: impl ToString) -> FanoutError {
    FanoutError::InvalidGlob {
        pattern: pattern.into(),
        reason: reason.to_string(),
    }
}

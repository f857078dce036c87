//! Git operation errors

use super::FanoutError;

pub fn operation_failed(message: impl Into<String>) -> FanoutError {
    FanoutError::GitOperationFailed {
        message: message.into(),
    }
}

pub fn open_failed(path: impl Into<String>, reason: impl ToString) -> FanoutError {
    FanoutError::GitOpenFailed {
        path: path.into(),
        reason: reason.to_string(),
    }
}

pub fn remote_not_found(remote: impl Into<String>) -> FanoutError {
    FanoutError::RemoteNotFound {
        remote: remote.into(),
    }
}

pub fn push_failed(remote: impl Into<String>, reason: impl ToString) -> FanoutError {
    FanoutError::GitPushFailed {
        remote: remote.into(),
        reason: reason.to_string(),
    }
}

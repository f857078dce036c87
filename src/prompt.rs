//! Commit message resolution
//!
//! `--message` wins, `--no-commit` skips, otherwise the user is asked once. An empty
//! answer or an interrupted prompt means "don't commit". Without a terminal the answer
//! is the first line of stdin, and closed stdin is an empty answer.

use std::io::{BufRead, IsTerminal};

use inquire::{InquireError, Text};

use crate::error::Result;

/// How the commit message is obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitMessage {
    Given(String),
    Skip,
    Ask,
}

impl CommitMessage {
    pub fn from_args(message: Option<String>, no_commit: bool) -> Self {
        match (message, no_commit) {
            (Some(message), _) => Self::Given(message),
            (None, true) => Self::Skip,
            (None, false) => Self::Ask,
        }
    }
}

fn non_empty(message: String) -> Option<String> {
    let trimmed = message.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Resolve the commit message, `None` meaning commit and push are skipped
pub fn resolve(source: CommitMessage) -> Result<Option<String>> {
    match source {
        CommitMessage::Given(message) => Ok(non_empty(message)),
        CommitMessage::Skip => Ok(None),
        CommitMessage::Ask => ask(),
    }
}

fn ask() -> Result<Option<String>> {
    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        tracing::debug!("stdin is not a terminal, reading commit message line");
        return read_answer(stdin.lock());
    }

    let answer = Text::new("Commit message:")
        .with_help_message("Leave empty to skip commit and push")
        .prompt();

    match answer {
        Ok(message) => Ok(non_empty(message)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            tracing::debug!("commit prompt interrupted");
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

/// One line of input as the answer
fn read_answer(mut input: impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(non_empty(line))
}

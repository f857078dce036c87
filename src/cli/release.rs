use clap::Parser;

use super::OutputArgs;

/// Arguments for the release command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Stage, publish, then ask for a commit message:\n    fanout release\n\n\
                  Commit and push without prompting:\n    fanout release -m \"Release 0.2.0\"\n\n\
                  Publish without touching git:\n    fanout release --no-commit")]
pub struct ReleaseArgs {
    #[command(flatten)]
    pub output: OutputArgs,

    /// Commit message (skips the prompt)
    #[arg(long, short = 'm', conflicts_with = "no_commit")]
    pub message: Option<String>,

    /// Do not commit or push after publishing
    #[arg(long)]
    pub no_commit: bool,
}

use clap::Parser;

use super::OutputArgs;

/// Arguments for the stage command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Stage every package into dest_root:\n    fanout stage\n\n\
                  Stage into another directory:\n    fanout stage --dest /tmp/packages")]
pub struct StageArgs {
    #[command(flatten)]
    pub output: OutputArgs,
}

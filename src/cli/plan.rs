use clap::Parser;

use super::OutputArgs;

/// Arguments for the plan command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Preview the packages a run would produce:\n    fanout plan\n\n\
                  Print the plan as JSON:\n    fanout plan --json")]
pub struct PlanArgs {
    /// Print the plan as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

//! Release command implementation
//!
//! Stage everything, build and upload each publishable package, then commit and push
//! the destination repository. Any failure stops the run where it happened.

use std::path::PathBuf;

use console::{Style, Term};

use crate::cli::ReleaseArgs;
use crate::error::Result;
use crate::git;
use crate::prompt::{self, CommitMessage};
use crate::publish;
use crate::stager;
use crate::ui::{InteractiveProgressReporter, ProgressReporter, SilentProgressReporter};

/// Run release command
pub fn run(root: Option<PathBuf>, config: Option<PathBuf>, args: ReleaseArgs) -> Result<()> {
    let session = super::prepare(root, config, &args.output)?;
    let config = &session.config;

    let report = stager::stage(&session.plan, config)?;
    super::stage::print_report(&report, &config.dest_root);

    let targets = session.plan.publish_targets();
    println!();
    println!("Publishing {} packages", targets.len());

    let mut reporter: Box<dyn ProgressReporter> = if Term::stdout().is_term() {
        Box::new(InteractiveProgressReporter::new(targets.len() as u64))
    } else {
        Box::new(SilentProgressReporter)
    };
    publish::publish(&targets, &config.tools, reporter.as_mut())?;

    let source = CommitMessage::from_args(args.message, args.no_commit);
    let Some(message) = prompt::resolve(source)? else {
        println!("Skipping commit and push");
        return Ok(());
    };

    let done = Style::new().green().bold();
    match git::commit_and_push(&config.dest_root, &message, &config.git.remote)? {
        Some(outcome) => println!(
            "{} {}{} to {}/{}",
            done.apply_to("Pushed"),
            outcome.oid,
            if outcome.created { "" } else { " (earlier commit)" },
            config.git.remote,
            outcome.branch
        ),
        None => println!("Nothing to commit"),
    }
    Ok(())
}

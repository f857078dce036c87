//! Stage command implementation

use std::path::PathBuf;

use console::Style;

use crate::cli::StageArgs;
use crate::error::Result;
use crate::stager::{self, StageReport};

/// Print what a staging run produced
pub fn print_report(report: &StageReport, dest_root: &std::path::Path) {
    let done = Style::new().green().bold();
    println!();
    println!(
        "{} {} packages into {}",
        done.apply_to("Staged"),
        report.staged.len(),
        dest_root.display()
    );
    println!("  Bundle requires: {}", report.bundle_requires.join(", "));
    println!("  Tree digest: {}", report.digest);
}

/// Run stage command
pub fn run(root: Option<PathBuf>, config: Option<PathBuf>, args: StageArgs) -> Result<()> {
    let session = super::prepare(root, config, &args.output)?;
    let report = stager::stage(&session.plan, &session.config)?;
    print_report(&report, &session.config.dest_root);
    Ok(())
}

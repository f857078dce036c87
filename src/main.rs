//! Fanout - package fan-out planner
//!
//! Republishes every module directory of a MicroPython library as its own package,
//! splits the aggregate module into one package per child and writes a bundle manifest
//! requiring everything that is published together.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod common;
mod config;
mod discovery;
mod domain;
mod error;
mod git;
mod hash;
mod manifest;
mod planner;
mod prompt;
mod publish;
mod stager;
mod ui;

use cli::{Cli, Commands};

/// Filter used when `RUST_LOG` is not set
fn default_filter(verbose: bool) -> &'static str {
    if verbose { "fanout=debug" } else { "fanout=warn" }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Plan(args) => commands::plan::run(cli.root, cli.config, args),
        Commands::Stage(args) => commands::stage::run(cli.root, cli.config, args),
        Commands::Release(args) => commands::release::run(cli.root, cli.config, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

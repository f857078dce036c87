//! CLI definitions using clap derive API
//!
//! Each command's arguments live in their own submodule; the overrides shared by every
//! command that builds a plan are in [`OutputArgs`].

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;
pub mod plan;
pub mod release;
pub mod stage;

pub use completions::CompletionsArgs;
pub use plan::PlanArgs;
pub use release::ReleaseArgs;
pub use stage::StageArgs;

/// Fanout - package fan-out planner
///
/// Republish every module directory of a MicroPython library as its own package.
#[derive(Parser, Debug)]
#[command(
    name = "fanout",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Fan a MicroPython library out into separately published packages",
    long_about = "Fanout turns every module directory of a MicroPython library into its own \
                  package with a manifest.py, splits the aggregate module into one package \
                  per child, and writes a bundle manifest requiring them all.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  fanout plan                         \x1b[90m# Preview packages\x1b[0m\n   \
                  fanout stage                        \x1b[90m# Write packages to dest_root\x1b[0m\n   \
                  fanout release -m \"Release 0.2.0\"   \x1b[90m# Stage, publish, commit and push\x1b[0m\n   \
                  fanout -c ci/fanout.yaml stage      \x1b[90m# Use another config file\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Project root containing fanout.yaml (defaults to current directory)
    #[arg(long, short = 'r', global = true, env = "FANOUT_ROOT")]
    pub root: Option<PathBuf>,

    /// Explicit configuration file (overrides --root)
    #[arg(long, short = 'c', global = true, env = "FANOUT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Preview the packages a run would produce
    Plan(PlanArgs),

    /// Write every package and the bundle manifest to the destination root
    Stage(StageArgs),

    /// Stage, build and upload every package, then commit and push
    Release(ReleaseArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Overrides shared by every command that plans
#[derive(Args, Debug, Default, Clone)]
pub struct OutputArgs {
    /// Destination root (overrides `dest_root` from fanout.yaml)
    #[arg(long, value_name = "DIR")]
    pub dest: Option<PathBuf>,

    /// Publish aggregate child packages and add them to the bundle
    #[arg(long)]
    pub publish_children: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_plan() {
        let cli = Cli::try_parse_from(["fanout", "plan"]).unwrap();
        match cli.command {
            Commands::Plan(args) => {
                assert!(!args.json);
                assert!(args.output.dest.is_none());
            }
            _ => panic!("Expected Plan command"),
        }
    }

    #[test]
    fn test_cli_parsing_stage_overrides() {
        let cli = Cli::try_parse_from([
            "fanout",
            "stage",
            "--dest",
            "/tmp/out",
            "--publish-children",
        ])
        .unwrap();
        match cli.command {
            Commands::Stage(args) => {
                assert_eq!(args.output.dest, Some(PathBuf::from("/tmp/out")));
                assert!(args.output.publish_children);
            }
            _ => panic!("Expected Stage command"),
        }
    }

    #[test]
    fn test_cli_parsing_release_message() {
        let cli = Cli::try_parse_from(["fanout", "release", "-m", "Release 0.2.0"]).unwrap();
        match cli.command {
            Commands::Release(args) => {
                assert_eq!(args.message.as_deref(), Some("Release 0.2.0"));
                assert!(!args.no_commit);
            }
            _ => panic!("Expected Release command"),
        }
    }

    #[test]
    fn test_cli_release_message_conflicts_with_no_commit() {
        let result = Cli::try_parse_from(["fanout", "release", "-m", "msg", "--no-commit"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parsing_version() {
        let cli = Cli::try_parse_from(["fanout", "version"]).unwrap();
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn test_cli_global_options() {
        let cli =
            Cli::try_parse_from(["fanout", "-v", "-r", "/tmp/project", "-c", "x.yaml", "plan"])
                .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.root, Some(PathBuf::from("/tmp/project")));
        assert_eq!(cli.config, Some(PathBuf::from("x.yaml")));
    }

    #[test]
    fn test_cli_global_options_after_subcommand() {
        let cli = Cli::try_parse_from(["fanout", "stage", "-r", "/tmp/project"]).unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("/tmp/project")));
    }

    #[test]
    #[serial_test::serial]
    fn test_cli_root_from_env() {
        unsafe {
            std::env::set_var("FANOUT_ROOT", "/tmp/env-root");
        }
        let cli = Cli::try_parse_from(["fanout", "plan"]).unwrap();
        unsafe {
            std::env::remove_var("FANOUT_ROOT");
        }
        assert_eq!(cli.root, Some(PathBuf::from("/tmp/env-root")));
    }

    #[test]
    #[serial_test::serial]
    fn test_cli_root_flag_overrides_env() {
        unsafe {
            std::env::set_var("FANOUT_ROOT", "/tmp/env-root");
        }
        let cli = Cli::try_parse_from(["fanout", "-r", "/tmp/flag-root", "plan"]).unwrap();
        unsafe {
            std::env::remove_var("FANOUT_ROOT");
        }
        assert_eq!(cli.root, Some(PathBuf::from("/tmp/flag-root")));
    }

    #[test]
    fn test_cli_parsing_completions() {
        let cli = Cli::try_parse_from(["fanout", "completions", "bash"]).unwrap();
        match cli.command {
            Commands::Completions(args) => {
                assert_eq!(args.shell, clap_complete::Shell::Bash);
            }
            _ => panic!("Expected Completions command"),
        }
    }

    #[test]
    fn test_cli_parsing_completions_unknown_shell() {
        assert!(Cli::try_parse_from(["fanout", "completions", "tcsh"]).is_err());
    }
}

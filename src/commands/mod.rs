//! Command implementations for the fanout CLI
//!
//! Every command that works on packages starts from the same [`prepare`] step: load the
//! configuration, apply CLI overrides, discover modules and build the plan.

pub mod completions;
pub mod plan;
pub mod release;
pub mod stage;
pub mod version;

use std::path::PathBuf;

use crate::cli::OutputArgs;
use crate::config::FanoutConfig;
use crate::discovery::discover_modules;
use crate::error::Result;
use crate::planner::{self, Plan};

/// Configuration plus the plan derived from it
pub struct Session {
    pub config: FanoutConfig,
    pub plan: Plan,
}

/// Load configuration, apply overrides and plan
pub fn prepare(
    root: Option<PathBuf>,
    config: Option<PathBuf>,
    output: &OutputArgs,
) -> Result<Session> {
    let path = FanoutConfig::locate(root.as_deref(), config.as_deref())?;
    let mut config = FanoutConfig::load(&path)?;
    apply_overrides(&mut config, output);

    let modules = discover_modules(&config.source_root, &config.aggregate.name)?;
    tracing::debug!(modules = modules.len(), "discovered modules");

    let plan = planner::plan(&config, &modules)?;
    Ok(Session { config, plan })
}

fn apply_overrides(config: &mut FanoutConfig, output: &OutputArgs) {
    if let Some(dest) = &output.dest {
        config.dest_root.clone_from(dest);
    }
    if output.publish_children {
        config.publish_child_packages = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> FanoutConfig {
        FanoutConfig::from_yaml("version: 1.0.0\ndest_root: out\nbundle:\n  name: all\n").unwrap()
    }

    #[test]
    fn test_apply_overrides_dest() {
        let mut config = config();
        let output = OutputArgs {
            dest: Some(PathBuf::from("/tmp/elsewhere")),
            publish_children: false,
        };
        apply_overrides(&mut config, &output);
        assert_eq!(config.dest_root, PathBuf::from("/tmp/elsewhere"));
        assert!(!config.publish_child_packages);
    }

    #[test]
    fn test_apply_overrides_keeps_file_values() {
        let mut config = config();
        config.publish_child_packages = true;
        apply_overrides(&mut config, &OutputArgs::default());
        assert_eq!(config.dest_root, PathBuf::from("out"));
        assert!(config.publish_child_packages);
    }
}

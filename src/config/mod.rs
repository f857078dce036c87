//! Configuration file handling for fanout
//!
//! This module contains data structures for `fanout.yaml`:
//! - top-level package metadata (version, author, license, description prefix)
//! - source and destination roots
//! - [`aggregate`]: the aggregate module and its child dispatch table
//! - [`tools`]: external build/upload tools and git settings
//!
//! The configuration is loaded once at entry and passed explicitly to the planner,
//! the stager and the release steps.

pub mod aggregate;
pub mod tools;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use aggregate::{AggregateConfig, ChildRule, ChildTarget};
pub use tools::{GitConfig, ToolsConfig};

use crate::error::{Result, config_invalid, config_not_found, config_parse_failed, config_read_failed};

/// Default configuration file name looked up in the project root
pub const CONFIG_FILE: &str = "fanout.yaml";

/// Placeholders allowed in path templates
const PLACEHOLDERS: &[&str] = &["child", "aggregate", "package"];

/// Bundle package settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BundleConfig {
    /// Name of the bundle package, also its directory under the destination root
    pub name: String,

    /// Bundle description; defaults to the description prefix followed by the name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// fanout.yaml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FanoutConfig {
    /// Version stamped into every manifest
    pub version: String,

    #[serde(default)]
    pub description_prefix: String,

    #[serde(default)]
    pub author: String,

    #[serde(default = "default_license")]
    pub license: String,

    /// Directory holding one subdirectory per module
    #[serde(default = "default_source_root")]
    pub source_root: PathBuf,

    /// Directory scanned for prefix-matched example files
    #[serde(default = "default_examples_dir")]
    pub examples_dir: PathBuf,

    /// Base directory for per-child configuration files
    #[serde(default = "default_configs_root")]
    pub configs_root: PathBuf,

    /// README copied verbatim into every package
    #[serde(default = "default_readme")]
    pub readme: PathBuf,

    /// Staging area; one subtree per package is written below it
    pub dest_root: PathBuf,

    #[serde(default)]
    pub aggregate: AggregateConfig,

    pub bundle: BundleConfig,

    /// Stage aggregate children into the bundle and publish them
    #[serde(default)]
    pub publish_child_packages: bool,

    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub git: GitConfig,
}

fn default_license() -> String {
    "MIT".to_string()
}

fn default_source_root() -> PathBuf {
    PathBuf::from("src/lib")
}

fn default_examples_dir() -> PathBuf {
    PathBuf::from("src/examples")
}

fn default_configs_root() -> PathBuf {
    PathBuf::from("board_configs")
}

fn default_readme() -> PathBuf {
    PathBuf::from("README.md")
}

impl FanoutConfig {
    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file, resolving relative paths against its directory
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(config_not_found(path.display().to_string()));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| config_read_failed(path.display().to_string(), e.to_string()))?;

        let mut config: Self = serde_yaml::from_str(&content)
            .map_err(|e| config_parse_failed(path.display().to_string(), e.to_string()))?;
        config.validate()?;

        let base = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        config.resolve_paths(&base);

        tracing::debug!(config = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Locate the configuration file from CLI arguments
    ///
    /// An explicit config path wins; otherwise `fanout.yaml` in the project root
    /// (defaulting to the current directory) is used.
    pub fn locate(root: Option<&Path>, config: Option<&Path>) -> Result<PathBuf> {
        if let Some(config) = config {
            return Ok(config.to_path_buf());
        }

        let root = match root {
            Some(root) => root.to_path_buf(),
            None => std::env::current_dir()?,
        };
        Ok(root.join(CONFIG_FILE))
    }

    /// Validate configuration values that serde cannot check
    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(config_invalid("`version` must not be empty"));
        }
        if self.dest_root.as_os_str().is_empty() {
            return Err(config_invalid("`dest_root` must not be empty"));
        }
        if self.bundle.name.trim().is_empty() {
            return Err(config_invalid("`bundle.name` must not be empty"));
        }
        self.aggregate.validate()?;
        self.tools.validate()?;
        Ok(())
    }

    fn resolve_paths(&mut self, base: &Path) {
        for path in [
            &mut self.source_root,
            &mut self.examples_dir,
            &mut self.configs_root,
            &mut self.readme,
            &mut self.dest_root,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }

    /// Description for a package, built from the configured prefix
    pub fn describe(&self, name: &str) -> String {
        let prefix = self.description_prefix.trim();
        if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix} {name}")
        }
    }

    /// Description of the bundle package
    pub fn bundle_description(&self) -> String {
        self.bundle
            .description
            .clone()
            .unwrap_or_else(|| self.describe(&self.bundle.name))
    }
}

/// Expand `{name}` placeholders in a path template
pub fn expand_template(template: &str, values: &[(&str, &str)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |acc, (key, value)| {
            acc.replace(&format!("{{{key}}}"), value)
        })
}

/// Check that a template only uses known placeholders
pub(crate) fn check_template(field: &str, template: &str) -> Result<()> {
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            return Err(config_invalid(format!(
                "`{field}` has an unclosed placeholder: {template}"
            )));
        };
        let name = &after[..end];
        if !PLACEHOLDERS.contains(&name) {
            return Err(config_invalid(format!(
                "`{field}` uses unknown placeholder {{{name}}}; allowed: {}",
                PLACEHOLDERS.join(", ")
            )));
        }
        rest = &after[end + 1..];
    }
    Ok(())
}

//! Aggregate module settings and the child dispatch table
//!
//! The aggregate module's children are packaged independently. Which package a child
//! becomes, where it is staged and where its example configuration comes from is decided
//! here by table lookup, with a fallback rule for children not listed in the table.

use std::collections::BTreeMap;
use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

use super::{check_template, expand_template};
use crate::error::{Result, config_invalid};

/// Per-child override in the dispatch table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChildRule {
    /// Example/config file, relative to `configs_root`
    pub examples: String,

    /// Destination directory, relative to `dest_root`; defaults to `{package}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest: Option<String>,
}

impl ChildRule {
    pub fn new(examples: impl Into<String>) -> Self {
        Self {
            examples: examples.into(),
            dest: None,
        }
    }
}

/// The aggregate module, e.g. `pydevices`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AggregateConfig {
    #[serde(default = "default_name")]
    pub name: String,

    /// Child entry that maps to the aggregate's own package
    #[serde(default = "default_sentinel")]
    pub sentinel: String,

    /// Known children whose example file lives somewhere special
    #[serde(default = "default_children")]
    pub children: BTreeMap<String, ChildRule>,

    /// Example path template for children missing from the table
    #[serde(default = "default_fallback")]
    pub fallback: String,
}

fn default_name() -> String {
    "pydevices".to_string()
}

fn default_sentinel() -> String {
    "__init__.py".to_string()
}

fn default_fallback() -> String {
    "{child}/board_config.py".to_string()
}

fn default_children() -> BTreeMap<String, ChildRule> {
    // The desktop drivers share one combined board config.
    BTreeMap::from([
        (
            "busdisplay".to_string(),
            ChildRule::new("busdisplay/i80/wt32sc01-plus/board_config.py"),
        ),
        (
            "dtdisplay".to_string(),
            ChildRule::new("desktop/board_config.py"),
        ),
        (
            "psdisplay".to_string(),
            ChildRule::new("desktop/board_config.py"),
        ),
    ])
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            sentinel: default_sentinel(),
            children: default_children(),
            fallback: default_fallback(),
        }
    }
}

/// Where a child of the aggregate ends up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildTarget {
    /// The sentinel: the aggregate's own top-level package
    Top,
    /// Any other child: a package that depends on the aggregate
    Child {
        package: String,
        /// Destination relative to `dest_root`
        dest: String,
        /// Example file relative to `configs_root`
        examples: String,
    },
}

/// A child destination must stay below `dest_root`
fn check_relative_dest(child: &str, dest: &str) -> Result<()> {
    let path = Path::new(dest);
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_)));
    if escapes || dest.trim().is_empty() {
        return Err(config_invalid(format!(
            "`aggregate.children.{child}.dest` must be a relative path below dest_root: {dest}"
        )));
    }
    Ok(())
}

impl AggregateConfig {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(config_invalid("`aggregate.name` must not be empty"));
        }
        if self.sentinel.trim().is_empty() {
            return Err(config_invalid("`aggregate.sentinel` must not be empty"));
        }
        check_template("aggregate.fallback", &self.fallback)?;
        for (child, rule) in &self.children {
            check_template(&format!("aggregate.children.{child}.examples"), &rule.examples)?;
            if let Some(dest) = &rule.dest {
                check_template(&format!("aggregate.children.{child}.dest"), dest)?;
                check_relative_dest(child, dest)?;
            }
        }
        Ok(())
    }

    /// Package name of an aggregate child
    pub fn child_package(&self, child: &str) -> String {
        format!("{}-{}", self.name, child)
    }

    /// Classify a child entry of the aggregate directory
    ///
    /// `entry` is the file or directory name as found on disk; `child` is the name
    /// used for packaging (the entry without its `.py` suffix).
    pub fn classify(&self, entry: &str, child: &str) -> ChildTarget {
        if entry == self.sentinel {
            return ChildTarget::Top;
        }

        let package = self.child_package(child);
        let values = [
            ("aggregate", self.name.as_str()),
            ("child", child),
            ("package", package.as_str()),
        ];

        let (examples, dest) = match self.children.get(child) {
            Some(rule) => (
                rule.examples.as_str(),
                rule.dest.as_deref().unwrap_or("{package}"),
            ),
            None => (self.fallback.as_str(), "{package}"),
        };

        ChildTarget::Child {
            dest: expand_template(dest, &values),
            examples: expand_template(examples, &values),
            package,
        }
    }
}

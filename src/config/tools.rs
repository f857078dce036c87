//! External tool and git settings

use serde::{Deserialize, Serialize};

use crate::error::{Result, config_invalid};

/// Build and upload commands run inside each staged package directory
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolsConfig {
    /// Build command as argv
    #[serde(default = "default_build")]
    pub build: Vec<String>,

    /// Upload command as argv; matching artifacts are appended
    #[serde(default = "default_upload")]
    pub upload: Vec<String>,

    /// Glob, relative to the package directory, selecting build artifacts
    #[serde(default = "default_artifacts")]
    pub artifacts: String,
}

fn default_build() -> Vec<String> {
    vec!["python".into(), "-m".into(), "build".into()]
}

fn default_upload() -> Vec<String> {
    vec!["twine".into(), "upload".into()]
}

fn default_artifacts() -> String {
    "dist/*".to_string()
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            build: default_build(),
            upload: default_upload(),
            artifacts: default_artifacts(),
        }
    }
}

impl ToolsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.build.first().is_none_or(|p| p.trim().is_empty()) {
            return Err(config_invalid("`tools.build` needs a program"));
        }
        if self.upload.first().is_none_or(|p| p.trim().is_empty()) {
            return Err(config_invalid("`tools.upload` needs a program"));
        }
        if self.artifacts.trim().is_empty() {
            return Err(config_invalid("`tools.artifacts` must not be empty"));
        }
        Ok(())
    }
}

/// Git settings for the destination repository
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitConfig {
    #[serde(default = "default_remote")]
    pub remote: String,
}

fn default_remote() -> String {
    "origin".to_string()
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: default_remote(),
        }
    }
}

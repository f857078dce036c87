//! Staging: lay the plan out on disk
//!
//! Packages are staged one after another. Each package directory receives its source,
//! a copy of the project README, an `examples/` directory and a `manifest.py`. The
//! bundle manifest is rewritten after every bundle member so that, if a later package
//! fails, it lists exactly the members staged so far. Nothing is rolled back.

use std::fs;
use std::path::Path;

use console::Style;

use crate::common::fs::{CopyOptions, copy_dir_recursive, copy_entry, prefixed_entries};
use crate::config::FanoutConfig;
use crate::domain::{ExampleSource, Package, SourceCopy};
use crate::error::{
    Result, copy_failed, example_not_found, file_write_failed, module_not_found, readme_not_found,
};
use crate::hash;
use crate::manifest::{MANIFEST_FILE, Manifest};
use crate::planner::Plan;

/// Outcome of a staging run
#[derive(Debug, Clone)]
pub struct StageReport {
    /// Packages staged, in order
    pub staged: Vec<String>,

    /// Final require list of the bundle manifest
    pub bundle_requires: Vec<String>,

    /// Digest of the destination tree after staging
    pub digest: String,
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|e| file_write_failed(path, e))
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| file_write_failed(path, e))
}

fn write_manifest(dir: &Path, manifest: &Manifest) -> Result<()> {
    write_file(&dir.join(MANIFEST_FILE), &manifest.render())
}

fn copy_readme(readme: &Path, dir: &Path) -> Result<()> {
    let target = dir.join("README.md");
    fs::copy(readme, &target).map_err(|e| copy_failed(readme, &target, e))?;
    Ok(())
}

fn copy_source(package: &Package, options: &CopyOptions) -> Result<()> {
    let origin = package.source.origin();
    if !origin.exists() {
        return Err(module_not_found(&package.name, origin));
    }

    match &package.source {
        SourceCopy::DirContents { from, to } => {
            copy_dir_recursive(from, to, options).map_err(|e| copy_failed(from, to, e))?;
        }
        SourceCopy::Entry { from, into } => {
            copy_entry(from, into, options).map_err(|e| copy_failed(from, into, e))?;
        }
    }
    Ok(())
}

fn copy_examples(package: &Package, options: &CopyOptions) -> Result<usize> {
    let examples_dir = package.examples_dir();

    match &package.examples {
        ExampleSource::Prefixed { dir, prefix } => {
            let entries =
                prefixed_entries(dir, prefix).map_err(|e| copy_failed(dir, &examples_dir, e))?;
            for entry in &entries {
                copy_entry(entry, &examples_dir, options)
                    .map_err(|e| copy_failed(entry, &examples_dir, e))?;
            }
            Ok(entries.len())
        }
        ExampleSource::File(path) => {
            if !path.is_file() {
                return Err(example_not_found(&package.name, path));
            }
            copy_entry(path, &examples_dir, options)
                .map_err(|e| copy_failed(path, &examples_dir, e))?;
            Ok(1)
        }
    }
}

/// Stage a single package
fn stage_package(package: &Package, config: &FanoutConfig, options: &CopyOptions) -> Result<()> {
    create_dir(&package.dest)?;
    create_dir(&package.examples_dir())?;

    copy_source(package, options)?;
    copy_readme(&config.readme, &package.dest)?;
    let examples = copy_examples(package, options)?;
    write_manifest(&package.dest, &package.manifest)?;

    tracing::debug!(
        package = %package.name,
        role = package.role.label(),
        dest = %package.dest.display(),
        examples,
        "staged package"
    );
    Ok(())
}

/// Stage every package of the plan under the destination root
pub fn stage(plan: &Plan, config: &FanoutConfig) -> Result<StageReport> {
    if !config.readme.is_file() {
        return Err(readme_not_found(&config.readme));
    }

    let options = CopyOptions::staging();
    let heading = Style::new().green().bold();

    let mut bundle = plan.bundle.manifest.clone();
    create_dir(&plan.bundle.dest)?;
    create_dir(&plan.bundle.dest.join("examples"))?;
    copy_readme(&config.readme, &plan.bundle.dest)?;
    write_manifest(&plan.bundle.dest, &bundle)?;

    let mut staged = Vec::with_capacity(plan.packages.len());
    for package in &plan.packages {
        println!("{} {}", heading.apply_to("Processing"), package.name);
        stage_package(package, config, &options)?;

        if package.in_bundle {
            bundle.require(&package.name);
            write_manifest(&plan.bundle.dest, &bundle)?;
        }
        staged.push(package.name.clone());
    }

    let digest = hash::hash_tree(&config.dest_root)?;
    Ok(StageReport {
        staged,
        bundle_requires: bundle.requires,
        digest,
    })
}

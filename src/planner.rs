//! Package fan-out planning
//!
//! Turns the discovered modules into packages: one per ordinary module, one for the
//! aggregate's sentinel child and one per other aggregate child. Nothing is written
//! here; the plan is a pure function of the configuration and the module listing, so
//! every naming and dependency rule can be checked before the filesystem is touched.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::{ChildTarget, FanoutConfig};
use crate::domain::{ExampleSource, Module, ModuleKind, Package, PackageRole, SourceCopy};
use crate::error::{Result, duplicate_package, module_not_found, nested_destination};
use crate::manifest::Manifest;

/// The bundle package that requires everything published together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundlePlan {
    pub name: String,
    pub dest: PathBuf,

    /// Manifest with an empty require list; entries are added as packages are staged
    pub manifest: Manifest,
}

/// Everything a run will stage, in staging order
#[derive(Debug, Clone)]
pub struct Plan {
    pub packages: Vec<Package>,
    pub bundle: BundlePlan,
}

/// A directory handed to the build and upload tools
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishTarget {
    pub name: String,
    pub dir: PathBuf,
}

impl Plan {
    #[cfg(test)]
    pub fn find(&self, name: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.name == name)
    }

    /// Names the bundle manifest will require after a complete run
    pub fn bundle_members(&self) -> Vec<&str> {
        self.packages
            .iter()
            .filter(|p| p.in_bundle)
            .map(|p| p.name.as_str())
            .collect()
    }

    /// Packages to build and upload, followed by the bundle itself
    pub fn publish_targets(&self) -> Vec<PublishTarget> {
        self.packages
            .iter()
            .filter(|p| p.publish)
            .map(|p| PublishTarget {
                name: p.name.clone(),
                dir: p.dest.clone(),
            })
            .chain(std::iter::once(PublishTarget {
                name: self.bundle.name.clone(),
                dir: self.bundle.dest.clone(),
            }))
            .collect()
    }
}

fn manifest_for(
    config: &FanoutConfig,
    name: &str,
    requires: Vec<String>,
    package: Option<&str>,
) -> Manifest {
    Manifest {
        description: config.describe(name),
        version: config.version.clone(),
        author: config.author.clone(),
        license: config.license.clone(),
        publish_name: name.to_string(),
        requires,
        package: package.map(str::to_string),
    }
}

fn plan_ordinary(config: &FanoutConfig, module: &Module) -> Package {
    let dest = config.dest_root.join(&module.name);
    Package {
        name: module.name.clone(),
        role: PackageRole::Ordinary,
        manifest: manifest_for(config, &module.name, Vec::new(), Some(&module.name)),
        source: SourceCopy::DirContents {
            from: module.path.clone(),
            to: dest.join(&module.name),
        },
        examples: ExampleSource::Prefixed {
            dir: config.examples_dir.clone(),
            prefix: module.name.clone(),
        },
        dest,
        in_bundle: true,
        publish: true,
    }
}

fn plan_aggregate(config: &FanoutConfig, module: &Module) -> Result<Vec<Package>> {
    let ModuleKind::Aggregate { children } = &module.kind else {
        return Ok(vec![plan_ordinary(config, module)]);
    };
    let aggregate = &config.aggregate;
    let name = module.name.as_str();

    let mut top = None;
    let mut rest = Vec::new();

    for child in children {
        match aggregate.classify(&child.entry, &child.name) {
            ChildTarget::Top => {
                let dest = config.dest_root.join(name);
                top = Some(Package {
                    name: name.to_string(),
                    role: PackageRole::AggregateTop,
                    manifest: manifest_for(config, name, Vec::new(), Some(name)),
                    source: SourceCopy::Entry {
                        from: child.path.clone(),
                        into: dest.join(name),
                    },
                    examples: ExampleSource::Prefixed {
                        dir: config.examples_dir.clone(),
                        prefix: name.to_string(),
                    },
                    dest,
                    in_bundle: true,
                    publish: true,
                });
            }
            ChildTarget::Child {
                package,
                dest,
                examples,
            } => {
                let dest = config.dest_root.join(dest);
                rest.push(Package {
                    manifest: manifest_for(config, &package, vec![name.to_string()], Some(name)),
                    name: package,
                    role: PackageRole::AggregateChild {
                        parent: name.to_string(),
                    },
                    source: SourceCopy::Entry {
                        from: child.path.clone(),
                        into: dest.join(name),
                    },
                    examples: ExampleSource::File(config.configs_root.join(examples)),
                    dest,
                    in_bundle: config.publish_child_packages,
                    publish: config.publish_child_packages,
                });
            }
        }
    }

    let Some(top) = top else {
        return Err(module_not_found(
            name,
            module.path.join(&aggregate.sentinel),
        ));
    };

    let mut packages = Vec::with_capacity(rest.len() + 1);
    packages.push(top);
    packages.extend(rest);
    Ok(packages)
}

/// Every package needs its own name and a directory no other package lives in
fn check_unique(packages: &[Package], bundle: &BundlePlan) -> Result<()> {
    let bundle_entry = (bundle.name.as_str(), bundle.dest.as_path());
    let staged: Vec<(&str, &Path)> = std::iter::once(bundle_entry)
        .chain(packages.iter().map(|p| (p.name.as_str(), p.dest.as_path())))
        .collect();

    let mut names = HashSet::new();
    let mut dests = HashSet::new();
    for (name, dest) in &staged {
        if !names.insert(*name) || !dests.insert(*dest) {
            return Err(duplicate_package(*name));
        }
    }

    for (name, dest) in &staged {
        if let Some((outer, _)) = staged
            .iter()
            .find(|(other, outer_dest)| other != name && dest.starts_with(outer_dest))
        {
            return Err(nested_destination(*name, *outer, dest));
        }
    }
    Ok(())
}

/// Plan every package for a run
pub fn plan(config: &FanoutConfig, modules: &[Module]) -> Result<Plan> {
    let mut packages = Vec::new();
    for module in modules {
        if module.is_aggregate() {
            packages.extend(plan_aggregate(config, module)?);
        } else {
            packages.push(plan_ordinary(config, module));
        }
    }

    let bundle_name = config.bundle.name.clone();
    let bundle = BundlePlan {
        dest: config.dest_root.join(&bundle_name),
        manifest: Manifest {
            description: config.bundle_description(),
            version: config.version.clone(),
            author: config.author.clone(),
            license: config.license.clone(),
            publish_name: bundle_name.clone(),
            requires: Vec::new(),
            package: None,
        },
        name: bundle_name,
    };

    check_unique(&packages, &bundle)?;

    tracing::debug!(packages = packages.len(), "planned packages");
    Ok(Plan { packages, bundle })
}

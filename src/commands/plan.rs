//! Plan command implementation
//!
//! Prints the packages a run would produce, their requires, bundle membership and
//! example source. Nothing is written to disk.

use std::path::PathBuf;

use console::Style;
use serde::Serialize;

use crate::cli::PlanArgs;
use crate::domain::{ExampleSource, Package, PackageRole};
use crate::error::Result;
use crate::planner::Plan;

#[derive(Debug, Serialize)]
struct PackageView<'a> {
    name: &'a str,
    role: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<&'a str>,
    dest: &'a PathBuf,
    requires: &'a [String],
    examples: String,
    in_bundle: bool,
    publish: bool,
}

#[derive(Debug, Serialize)]
struct BundleView<'a> {
    name: &'a str,
    dest: &'a PathBuf,
    requires: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
struct PlanView<'a> {
    packages: Vec<PackageView<'a>>,
    bundle: BundleView<'a>,
}

fn describe_examples(examples: &ExampleSource) -> String {
    match examples {
        ExampleSource::Prefixed { dir, prefix } => {
            format!("{}*", dir.join(prefix).display())
        }
        ExampleSource::File(path) => path.display().to_string(),
    }
}

fn package_view(package: &Package) -> PackageView<'_> {
    PackageView {
        name: &package.name,
        role: package.role.label(),
        parent: match &package.role {
            PackageRole::AggregateChild { parent } => Some(parent.as_str()),
            _ => None,
        },
        dest: &package.dest,
        requires: &package.manifest.requires,
        examples: describe_examples(&package.examples),
        in_bundle: package.in_bundle,
        publish: package.publish,
    }
}

fn plan_view(plan: &Plan) -> PlanView<'_> {
    PlanView {
        packages: plan.packages.iter().map(package_view).collect(),
        bundle: BundleView {
            name: &plan.bundle.name,
            dest: &plan.bundle.dest,
            requires: plan.bundle_members(),
        },
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn print_plan(view: &PlanView<'_>) {
    let name_style = Style::new().bold().yellow();
    let label = Style::new().bold();

    println!("Packages ({}):", view.packages.len());
    println!();
    for package in &view.packages {
        println!("  {}", name_style.apply_to(package.name));
        match package.parent {
            Some(parent) => println!(
                "    {} {} of {parent}",
                label.apply_to("Role:"),
                package.role
            ),
            None => println!("    {} {}", label.apply_to("Role:"), package.role),
        }
        if !package.requires.is_empty() {
            println!(
                "    {} {}",
                label.apply_to("Requires:"),
                package.requires.join(", ")
            );
        }
        println!("    {} {}", label.apply_to("Examples:"), package.examples);
        println!("    {} {}", label.apply_to("Destination:"), package.dest.display());
        println!(
            "    {} {}  {} {}",
            label.apply_to("Bundle:"),
            yes_no(package.in_bundle),
            label.apply_to("Publish:"),
            yes_no(package.publish)
        );
        println!();
    }

    println!(
        "{} {} ({})",
        label.apply_to("Bundle:"),
        name_style.apply_to(view.bundle.name),
        view.bundle.dest.display()
    );
    println!(
        "    {} {}",
        label.apply_to("Requires:"),
        view.bundle.requires.join(", ")
    );
}

/// Run plan command
pub fn run(root: Option<PathBuf>, config: Option<PathBuf>, args: PlanArgs) -> Result<()> {
    let session = super::prepare(root, config, &args.output)?;
    let view = plan_view(&session.plan);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print_plan(&view);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FanoutConfig;
    use crate::domain::{Module, ModuleChild};
    use crate::planner;

    fn sample_plan() -> Plan {
        let config = FanoutConfig::from_yaml(
            "version: 1.0.0\ndest_root: /out\nexamples_dir: /ex\nbundle:\n  name: all\naggregate:\n  name: widgets\n",
        )
        .unwrap();
        let modules = vec![
            Module::ordinary("alpha", "/lib/alpha"),
            Module::aggregate(
                "widgets",
                "/lib/widgets",
                vec![
                    ModuleChild::new("__init__.py", "/lib/widgets/__init__.py"),
                    ModuleChild::new("sub1.py", "/lib/widgets/sub1.py"),
                ],
            ),
        ];
        planner::plan(&config, &modules).unwrap()
    }

    #[test]
    fn test_plan_view_json() {
        let plan = sample_plan();
        let json = serde_json::to_value(plan_view(&plan)).unwrap();

        let names: Vec<_> = json["packages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["alpha", "widgets", "widgets-sub1"]);

        assert_eq!(json["packages"][2]["parent"], "widgets");
        assert_eq!(json["packages"][2]["requires"][0], "widgets");
        assert!(json["packages"][0].get("parent").is_none());
        assert_eq!(json["bundle"]["requires"], serde_json::json!(["alpha", "widgets"]));
    }

    #[cfg(unix)]
    #[test]
    fn test_describe_examples() {
        let prefixed = ExampleSource::Prefixed {
            dir: PathBuf::from("/ex"),
            prefix: "alpha".to_string(),
        };
        assert_eq!(describe_examples(&prefixed), "/ex/alpha*");

        let file = ExampleSource::File(PathBuf::from("/cfg/sub1/board_config.py"));
        assert_eq!(describe_examples(&file), "/cfg/sub1/board_config.py");
    }
}

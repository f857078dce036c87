//! External build and upload tools
//!
//! Each publishable package is built and uploaded from its own staging directory.
//! The tools are opaque: fanout only checks their exit status. Artifacts left over from
//! an earlier run are removed before building, so only fresh build output is uploaded.

use std::path::{Path, PathBuf};
use std::process::Command;

use walkdir::WalkDir;
use wax::{Glob, Pattern};

use crate::config::ToolsConfig;
use crate::error::{
    Result, config_invalid, file_write_failed, invalid_glob, tool_failed, tool_spawn_failed,
};
use crate::planner::PublishTarget;
use crate::ui::ProgressReporter;

/// Run `argv` with `cwd` as working directory
pub fn run_tool(argv: &[String], cwd: &Path, package: &str) -> Result<()> {
    let Some((program, args)) = argv.split_first() else {
        return Err(config_invalid("tool command is empty"));
    };

    tracing::debug!(program, ?args, cwd = %cwd.display(), package, "running tool");

    let status = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .status()
        .map_err(|e| tool_spawn_failed(program, e))?;

    if !status.success() {
        return Err(tool_failed(program, package, status));
    }
    Ok(())
}

/// Files under `dir` matching `pattern`, relative to `dir` and sorted
pub fn find_artifacts(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let glob = Glob::new(pattern).map_err(|e| invalid_glob(pattern, e))?;

    let mut artifacts = Vec::new();
    for entry in WalkDir::new(dir)
        .into_iter()
        .filter_entry(|e| e.file_name() != ".git")
    {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(dir) else {
            continue;
        };
        if glob.is_match(relative) {
            artifacts.push(relative.to_path_buf());
        }
    }
    artifacts.sort();
    Ok(artifacts)
}

/// Remove artifacts an earlier build left in `dir`
pub fn clear_artifacts(dir: &Path, pattern: &str) -> Result<()> {
    for stale in find_artifacts(dir, pattern)? {
        let path = dir.join(&stale);
        tracing::debug!(path = %path.display(), "removing stale artifact");
        std::fs::remove_file(&path).map_err(|e| file_write_failed(&path, e))?;
    }
    Ok(())
}

fn publish_one(
    target: &PublishTarget,
    tools: &ToolsConfig,
    reporter: &mut dyn ProgressReporter,
) -> Result<()> {
    clear_artifacts(&target.dir, &tools.artifacts)?;
    reporter.step("building");
    run_tool(&tools.build, &target.dir, &target.name)?;

    let artifacts = find_artifacts(&target.dir, &tools.artifacts)?;
    if artifacts.is_empty() {
        tracing::warn!(
            package = %target.name,
            pattern = %tools.artifacts,
            "build produced no artifacts"
        );
    }

    reporter.step("uploading");
    let mut upload = tools.upload.clone();
    upload.extend(artifacts.iter().map(|a| a.to_string_lossy().into_owned()));
    run_tool(&upload, &target.dir, &target.name)
}

/// Build and upload every target in order, stopping at the first failure
pub fn publish(
    targets: &[PublishTarget],
    tools: &ToolsConfig,
    reporter: &mut dyn ProgressReporter,
) -> Result<()> {
    let total = targets.len();
    for (index, target) in targets.iter().enumerate() {
        reporter.start_package(&target.name, index + 1, total);
        if let Err(err) = publish_one(target, tools, reporter) {
            reporter.abandon();
            return Err(err);
        }
        reporter.finish_package();
    }
    reporter.finish();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::SilentProgressReporter;
    use std::fs;
    use tempfile::TempDir;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_find_artifacts() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("dist")).unwrap();
        fs::write(temp.path().join("dist/b-1.0.tar.gz"), "").unwrap();
        fs::write(temp.path().join("dist/a-1.0.whl"), "").unwrap();
        fs::write(temp.path().join("manifest.py"), "").unwrap();

        let found = find_artifacts(temp.path(), "dist/*").unwrap();
        assert_eq!(
            found,
            [PathBuf::from("dist/a-1.0.whl"), PathBuf::from("dist/b-1.0.tar.gz")]
        );
    }

    #[test]
    fn test_clear_artifacts_keeps_other_files() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("dist")).unwrap();
        fs::write(temp.path().join("dist/alpha-0.9.tar.gz"), "").unwrap();
        fs::write(temp.path().join("manifest.py"), "").unwrap();

        clear_artifacts(temp.path(), "dist/*").unwrap();

        assert!(!temp.path().join("dist/alpha-0.9.tar.gz").exists());
        assert!(temp.path().join("manifest.py").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_publish_uploads_only_fresh_artifacts() {
        let temp = TempDir::new().unwrap();
        let pkg = temp.path().join("alpha");
        fs::create_dir_all(pkg.join("dist")).unwrap();
        fs::write(pkg.join("dist/alpha-0.9.tar.gz"), "old").unwrap();

        let tools = ToolsConfig {
            build: argv(&["sh", "-c", "mkdir -p dist && touch dist/alpha-1.0.tar.gz"]),
            upload: argv(&["sh", "-c", "echo \"$@\" > uploaded.txt", "upload"]),
            artifacts: "dist/*".to_string(),
        };
        let targets = [PublishTarget {
            name: "alpha".to_string(),
            dir: pkg.clone(),
        }];

        publish(&targets, &tools, &mut SilentProgressReporter).unwrap();

        assert_eq!(
            fs::read_to_string(pkg.join("uploaded.txt")).unwrap().trim(),
            "dist/alpha-1.0.tar.gz"
        );
    }

    #[test]
    fn test_find_artifacts_invalid_pattern() {
        let temp = TempDir::new().unwrap();
        assert!(find_artifacts(temp.path(), "dist/{a,b").is_err());
    }

    #[test]
    fn test_run_tool_empty_command() {
        let temp = TempDir::new().unwrap();
        assert!(run_tool(&[], temp.path(), "alpha").is_err());
    }

    #[test]
    fn test_run_tool_missing_program() {
        let temp = TempDir::new().unwrap();
        let err = run_tool(&argv(&["fanout-no-such-tool"]), temp.path(), "alpha").unwrap_err();
        assert!(matches!(err, crate::error::FanoutError::ToolSpawnFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_tool_failure_status() {
        let temp = TempDir::new().unwrap();
        let err = run_tool(&argv(&["false"]), temp.path(), "alpha").unwrap_err();
        assert!(matches!(err, crate::error::FanoutError::ToolFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_publish_runs_in_package_dir_and_passes_artifacts() {
        let temp = TempDir::new().unwrap();
        let pkg = temp.path().join("alpha");
        fs::create_dir_all(&pkg).unwrap();

        let tools = ToolsConfig {
            build: argv(&["sh", "-c", "mkdir -p dist && touch dist/alpha-1.0.tar.gz"]),
            upload: argv(&["sh", "-c", "echo \"$@\" > uploaded.txt", "upload"]),
            artifacts: "dist/*".to_string(),
        };
        let targets = [PublishTarget {
            name: "alpha".to_string(),
            dir: pkg.clone(),
        }];

        publish(&targets, &tools, &mut SilentProgressReporter).unwrap();

        assert_eq!(
            fs::read_to_string(pkg.join("uploaded.txt")).unwrap().trim(),
            "dist/alpha-1.0.tar.gz"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_publish_stops_at_first_failure() {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("alpha");
        let second = temp.path().join("beta");
        fs::create_dir_all(&first).unwrap();
        fs::create_dir_all(&second).unwrap();

        let tools = ToolsConfig {
            build: argv(&["sh", "-c", "touch built; exit 3"]),
            upload: argv(&["true"]),
            artifacts: "dist/*".to_string(),
        };
        let targets = [
            PublishTarget {
                name: "alpha".to_string(),
                dir: first.clone(),
            },
            PublishTarget {
                name: "beta".to_string(),
                dir: second.clone(),
            },
        ];

        assert!(publish(&targets, &tools, &mut SilentProgressReporter).is_err());
        assert!(first.join("built").exists());
        assert!(!second.join("built").exists());
    }
}

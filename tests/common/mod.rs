//! Common test utilities for fanout integration tests

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Minimal configuration for the sample project
#[allow(dead_code)]
pub const SAMPLE_CONFIG: &str = r"version: 0.2.0
description_prefix: MPDisplay
author: Test Author
dest_root: out
aggregate:
  name: widgets
  children:
    sub1:
      examples: wt32/{child}/board_config.py
bundle:
  name: bundle
";

/// A throwaway project tree driven through the real binary
#[allow(dead_code)]
pub struct TestProject {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to project root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestProject {
    /// Create an empty project
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Project with modules `alpha`, `beta` and the aggregate `widgets{__init__, sub1, sub2}`
    pub fn sample() -> Self {
        let project = Self::new();
        project.write_file("fanout.yaml", SAMPLE_CONFIG);
        project.write_file("README.md", "# Sample\n");
        project.write_file("src/lib/alpha/alpha.py", "A = 1\n");
        project.write_file("src/lib/beta/beta.py", "B = 2\n");
        project.write_file("src/lib/widgets/__init__.py", "# widgets\n");
        project.write_file("src/lib/widgets/sub1.py", "S1 = 1\n");
        project.write_file("src/lib/widgets/sub2/impl.py", "S2 = 2\n");
        project.write_file("src/examples/alpha_demo.py", "print('alpha')\n");
        project.write_file("board_configs/wt32/sub1/board_config.py", "# sub1\n");
        project.write_file("board_configs/sub2/board_config.py", "# sub2\n");
        project
    }

    /// Write a file in the project
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Append configuration lines to fanout.yaml
    pub fn append_config(&self, yaml: &str) {
        let mut config = self.read_file("fanout.yaml");
        config.push_str(yaml);
        self.write_file("fanout.yaml", &config);
    }

    /// Read a file from the project
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in the project
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Remove a file from the project
    pub fn remove_file(&self, path: &str) {
        std::fs::remove_file(self.path.join(path)).expect("Failed to remove file");
    }

    /// fanout command running in the project root
    pub fn cmd(&self) -> Command {
        let mut cmd = fanout_cmd();
        cmd.current_dir(&self.path);
        cmd
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// fanout command with a clean environment
#[allow(deprecated)]
pub fn fanout_cmd() -> Command {
    let mut cmd = Command::cargo_bin("fanout").expect("fanout binary");
    cmd.env_remove("FANOUT_ROOT")
        .env_remove("FANOUT_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// All files below `root`, relative and sorted, with their contents
#[allow(dead_code)]
pub fn snapshot(root: &Path) -> Vec<(PathBuf, Vec<u8>)> {
    let mut files: Vec<_> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let relative = e
                .path()
                .strip_prefix(root)
                .expect("under root")
                .to_path_buf();
            let content = std::fs::read(e.path()).expect("Failed to read file");
            (relative, content)
        })
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_file_operations() {
        let project = TestProject::new();
        project.write_file("a/b.txt", "hello");
        assert!(project.file_exists("a/b.txt"));
        assert_eq!(project.read_file("a/b.txt"), "hello");
    }

    #[test]
    fn test_sample_project_layout() {
        let project = TestProject::sample();
        assert!(project.file_exists("fanout.yaml"));
        assert!(project.file_exists("src/lib/widgets/__init__.py"));
    }
}

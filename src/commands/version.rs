//! Version command implementation

use crate::config::CONFIG_FILE;
use crate::error::Result;
use crate::manifest::MANIFEST_FILE;

/// Lines printed by `fanout version`
fn version_lines() -> Vec<String> {
    let build = if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    };
    vec![
        format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        format!("  minimum rust: {}", env!("CARGO_PKG_RUST_VERSION")),
        format!("  build: {build}"),
        format!("  reads {CONFIG_FILE}, writes {MANIFEST_FILE}"),
    ]
}

/// Run version command
pub fn run() -> Result<()> {
    for line in version_lines() {
        println!("{line}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_lines_start_with_name() {
        let lines = version_lines();
        assert_eq!(
            lines[0],
            format!("fanout {}", env!("CARGO_PKG_VERSION"))
        );
        assert!(lines.iter().any(|l| l.contains("manifest.py")));
    }
}

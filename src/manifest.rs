//! `manifest.py` rendering
//!
//! Manifests follow the MicroPython `manifest.py` convention: a `metadata(...)` call,
//! one `require(...)` per dependency and an optional `package(...)` declaration.
//! Rendering is deterministic so re-staging an unchanged tree is byte-identical.

use std::fmt::Write;

/// File name of a package manifest
pub const MANIFEST_FILE: &str = "manifest.py";

/// Metadata record attached to a package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub description: String,
    pub version: String,
    pub author: String,
    pub license: String,

    /// Name the package is published under
    pub publish_name: String,

    /// Required package names, in declaration order
    pub requires: Vec<String>,

    /// Python package declared by this manifest; `None` for the bundle
    pub package: Option<String>,
}

impl Manifest {
    /// Append a dependency edge unless it is already present
    pub fn require(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.requires.contains(&name) {
            self.requires.push(name);
        }
    }

    /// Render the manifest as Python source
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("metadata(\n");
        let fields = [
            ("description", &self.description),
            ("version", &self.version),
            ("author", &self.author),
            ("license", &self.license),
            ("pypi_publish", &self.publish_name),
        ];
        for (key, value) in fields {
            let _ = writeln!(out, "    {key}={},", py_string(value));
        }
        out.push_str(")\n");

        if !self.requires.is_empty() {
            out.push('\n');
            for dep in &self.requires {
                let _ = writeln!(out, "require({})", py_string(dep));
            }
        }

        if let Some(package) = &self.package {
            out.push('\n');
            let _ = writeln!(out, "package({})", py_string(package));
        }

        out
    }
}

/// Quote a value as a double-quoted Python string literal
fn py_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

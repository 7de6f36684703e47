//! Block-structured extraction from a Go `go.mod`.

use crate::deps::{Dependency, Ecosystem, ExtractionDepth, ManifestExtractor};
use crate::error::{Result, ScanError};
use std::fs;
use std::path::Path;

const MANIFEST: &str = "go.mod";

/// Parses `require ( … )` blocks only. Lines outside a block are ignored,
/// including single-line `require` directives, matching the declaration
/// style `go mod tidy` emits.
pub struct GoModExtractor;

impl GoModExtractor {
    fn parse(content: &str) -> Vec<Dependency> {
        let mut dependencies = Vec::new();
        let mut in_require_block = false;

        for line in content.lines() {
            let line = line.trim();

            if line.starts_with("require (") {
                in_require_block = true;
                continue;
            }

            if in_require_block && line == ")" {
                in_require_block = false;
                continue;
            }

            if !in_require_block || line.is_empty() || line.starts_with("//") {
                continue;
            }

            let mut parts = line.split_whitespace();
            if let (Some(name), Some(version)) = (parts.next(), parts.next()) {
                dependencies.push(Dependency::new(name, version, Ecosystem::Go));
            }
        }

        dependencies
    }
}

impl ManifestExtractor for GoModExtractor {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Go
    }

    fn manifest_name(&self) -> &'static str {
        MANIFEST
    }

    fn depth(&self) -> ExtractionDepth {
        ExtractionDepth::Deep
    }

    fn extract(&self, root: &Path) -> Result<Vec<Dependency>> {
        let path = root.join(MANIFEST);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path).map_err(|e| ScanError::ReadError {
            path,
            source: e,
        })?;

        Ok(Self::parse(&content))
    }
}

//! Line-oriented extraction from a Python `requirements.txt`.

use crate::deps::{Dependency, Ecosystem, ExtractionDepth, ManifestExtractor};
use crate::error::{Result, ScanError};
use std::fs;
use std::path::Path;

const MANIFEST: &str = "requirements.txt";

/// Parses one declaration per line. Exact pins (`name==version`) keep the
/// bare version, lower bounds (`name>=version`) keep the `>=` prefix, and
/// bare names become `*`.
pub struct RequirementsExtractor;

impl RequirementsExtractor {
    fn parse_line(line: &str) -> Option<Dependency> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        let (name, version) = if let Some((name, version)) = line.split_once("==") {
            (name.trim(), version.trim().to_string())
        } else if let Some((name, version)) = line.split_once(">=") {
            (name.trim(), format!(">={}", version.trim()))
        } else {
            (line, "*".to_string())
        };

        Some(Dependency::new(name, version, Ecosystem::Python))
    }
}

impl ManifestExtractor for RequirementsExtractor {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Python
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

        Ok(content.lines().filter_map(Self::parse_line).collect())
    }
}

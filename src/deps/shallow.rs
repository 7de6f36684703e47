//! Shallow manifest detection.
//!
//! Some ecosystems are deliberately not parsed: a present manifest yields
//! exactly one sentinel dependency meaning "manifest present, contents
//! unexamined". Downstream consumers can tell this tier apart from real
//! extraction through [`ExtractionDepth::Shallow`].

use crate::deps::{Dependency, Ecosystem, ExtractionDepth, ManifestExtractor};
use crate::error::Result;
use std::path::Path;

pub struct ShallowManifestExtractor {
    ecosystem: Ecosystem,
    manifest: &'static str,
    sentinel: &'static str,
}

impl ShallowManifestExtractor {
    pub fn npm() -> Self {
        Self {
            ecosystem: Ecosystem::Npm,
            manifest: "package.json",
            sentinel: "npm-dependencies",
        }
    }

    pub fn cargo() -> Self {
        Self {
            ecosystem: Ecosystem::Cargo,
            manifest: "Cargo.toml",
            sentinel: "cargo-dependencies",
        }
    }
}

impl ManifestExtractor for ShallowManifestExtractor {
    fn ecosystem(&self) -> Ecosystem {
        self.ecosystem
    }

    fn manifest_name(&self) -> &'static str {
        self.manifest
    }

    fn depth(&self) -> ExtractionDepth {
        ExtractionDepth::Shallow
    }

    fn extract(&self, root: &Path) -> Result<Vec<Dependency>> {
        if !root.join(self.manifest).exists() {
            return Ok(Vec::new());
        }

        Ok(vec![Dependency::new(
            self.sentinel,
            "detected",
            self.ecosystem,
        )])
    }
}

//! Dependency extraction from ecosystem manifests.
//!
//! One extractor per ecosystem, keyed by its recognized manifest filename.
//! Extractors are either deep (declarations parsed) or shallow (manifest
//! presence recorded as a single sentinel dependency); the distinction is a
//! queryable property, not an implicit code path.

mod gomod;
mod python;
mod shallow;

pub use gomod::GoModExtractor;
pub use python::RequirementsExtractor;
pub use shallow::ShallowManifestExtractor;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    Python,
    Go,
    Npm,
    Cargo,
}

impl Ecosystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ecosystem::Python => "python",
            Ecosystem::Go => "go",
            Ecosystem::Npm => "npm",
            Ecosystem::Cargo => "cargo",
        }
    }
}

impl std::fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Architecture-compatibility status of a dependency. The scanner never
/// asserts Yes/No itself; only an external verifier does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compatibility {
    #[default]
    Unknown,
    Yes,
    No,
}

impl Compatibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Compatibility::Unknown => "unknown",
            Compatibility::Yes => "yes",
            Compatibility::No => "no",
        }
    }
}

/// Whether an extractor parses declarations or only records that a
/// manifest exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionDepth {
    Deep,
    Shallow,
}

/// A declared dependency. The version is kept literally: a range keeps its
/// `>=` prefix, a bare declaration becomes `*`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,
    pub version: String,
    pub ecosystem: Ecosystem,
    pub compatibility: Compatibility,
}

impl Dependency {
    pub fn new(name: impl Into<String>, version: impl Into<String>, ecosystem: Ecosystem) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            ecosystem,
            compatibility: Compatibility::Unknown,
        }
    }

    /// For an external compatibility verifier; the core never calls this.
    pub fn set_compatibility(&mut self, compatibility: Compatibility) {
        self.compatibility = compatibility;
    }
}

/// One handler per ecosystem. An absent manifest is not an error: the
/// ecosystem simply contributes zero dependencies.
pub trait ManifestExtractor {
    fn ecosystem(&self) -> Ecosystem;
    /// Manifest filename this extractor recognizes, relative to the root.
    fn manifest_name(&self) -> &'static str;
    fn depth(&self) -> ExtractionDepth;
    fn extract(&self, root: &Path) -> Result<Vec<Dependency>>;
}

/// Registry of per-ecosystem extractors, applied in registration order.
pub struct ExtractorRegistry {
    extractors: Vec<Box<dyn ManifestExtractor + Send + Sync>>,
}

impl ExtractorRegistry {
    /// The standard registry: Python and Go parsed deeply, npm and Cargo
    /// shallow-detected.
    pub fn standard() -> Self {
        Self {
            extractors: vec![
                Box::new(RequirementsExtractor),
                Box::new(GoModExtractor),
                Box::new(ShallowManifestExtractor::npm()),
                Box::new(ShallowManifestExtractor::cargo()),
            ],
        }
    }

    pub fn extractors(&self) -> &[Box<dyn ManifestExtractor + Send + Sync>] {
        &self.extractors
    }

    /// Run every extractor against the root. A manifest that exists but
    /// cannot be read degrades to zero dependencies with a warning; it
    /// never aborts the scan.
    pub fn extract_all(&self, root: &Path) -> Vec<Dependency> {
        let mut dependencies = Vec::new();

        for extractor in &self.extractors {
            match extractor.extract(root) {
                Ok(deps) => {
                    debug!(
                        ecosystem = extractor.ecosystem().as_str(),
                        count = deps.len(),
                        "Extracted dependencies"
                    );
                    dependencies.extend(deps);
                }
                Err(e) => {
                    warn!(
                        ecosystem = extractor.ecosystem().as_str(),
                        manifest = extractor.manifest_name(),
                        error = %e,
                        "Skipping unreadable manifest"
                    );
                }
            }
        }

        dependencies
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

//! archscan — architecture-portability scanner core.
//!
//! Walks a project tree, matches architecture-specific source constructs
//! against a categorized rule set, extracts declared dependencies from
//! ecosystem manifests, detects build-system descriptor files, and
//! aggregates everything into one immutable [`ScanReport`].
//!
//! The crate is a library only: argument parsing and report rendering
//! belong to downstream consumers. All report types are serde-serializable
//! so a presentation layer can emit JSON or tables without the core
//! formatting anything.

pub mod buildsys;
pub mod deps;
pub mod discovery;
pub mod error;
pub mod report;
pub mod rules;
pub mod scanner;

pub use buildsys::{BuildSystem, BuildSystemDescriptor, BuildSystemDetector};
pub use deps::{
    Compatibility, Dependency, Ecosystem, ExtractionDepth, ExtractorRegistry, ManifestExtractor,
};
pub use discovery::FileWalker;
pub use error::{Result, ScanError};
pub use report::{ReportBuilder, ScanReport, Summary};
pub use rules::{Category, Issue, PatternEngine, Rule, RuleSet, RuleSpec, Severity};
pub use scanner::{CancelToken, ProjectScanner};

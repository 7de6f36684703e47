//! Scan orchestration.
//!
//! Wires the walker, pattern engine, dependency registry, and build-system
//! detector together and assembles the final report. Only a missing root
//! aborts; every other failure degrades to a skip that is visible in the
//! report's own counts.

use crate::buildsys::BuildSystemDetector;
use crate::deps::ExtractorRegistry;
use crate::discovery::FileWalker;
use crate::error::Result;
use crate::report::{ReportBuilder, ScanReport};
use crate::rules::{Issue, PatternEngine, RuleSpec};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Cooperative cancellation flag, checked between files. A cancelled scan
/// reports what was completed instead of failing.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Scans one project root and produces a [`ScanReport`].
pub struct ProjectScanner {
    root: PathBuf,
    recursive: bool,
    parallel: bool,
    cancel: CancelToken,
    engine: PatternEngine,
    registry: ExtractorRegistry,
    detector: BuildSystemDetector,
}

impl ProjectScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            recursive: true,
            parallel: false,
            cancel: CancelToken::new(),
            engine: PatternEngine::new(),
            registry: ExtractorRegistry::standard(),
            detector: BuildSystemDetector::new(),
        }
    }

    /// When false, only root-level files are scanned.
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Scan files on a bounded worker pool. Per-file results are collected
    /// by walk index, so issue ordering is identical to a sequential scan.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_cancellation(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Register extension rules on top of the builtin table.
    pub fn with_rules(mut self, specs: impl IntoIterator<Item = RuleSpec>) -> Self {
        self.engine = self.engine.with_rules(specs);
        self
    }

    /// Run the scan. Fails only when the root path itself is missing;
    /// otherwise a best-effort report is always produced.
    pub fn scan(&self) -> Result<ScanReport> {
        info!(root = %self.root.display(), recursive = self.recursive, "Starting scan");

        let files = FileWalker::new(&self.root)
            .with_recursive(self.recursive)
            .walk()?;
        let total_files = files.len();

        let (issues, scanned_files) = if self.parallel {
            self.scan_files_parallel(&files)
        } else {
            self.scan_files_sequential(&files)
        };

        let (dependencies, build_systems) = if self.cancel.is_cancelled() {
            info!(scanned = scanned_files, total = total_files, "Scan cancelled");
            (Vec::new(), Vec::new())
        } else {
            let dependencies = self.registry.extract_all(&self.root);
            let build_systems = self.detector.detect(&self.root)?;
            (dependencies, build_systems)
        };

        debug!(
            total = total_files,
            scanned = scanned_files,
            issues = issues.len(),
            dependencies = dependencies.len(),
            build_systems = build_systems.len(),
            "Scan complete"
        );

        Ok(ReportBuilder::new()
            .with_total_files(total_files)
            .with_scanned_files(scanned_files)
            .with_issues(issues)
            .with_dependencies(dependencies)
            .with_build_systems(build_systems)
            .build())
    }

    fn scan_files_sequential(&self, files: &[PathBuf]) -> (Vec<Issue>, usize) {
        let mut issues = Vec::new();
        let mut scanned = 0;

        for path in files {
            if self.cancel.is_cancelled() {
                break;
            }
            if let Some(file_issues) = self.scan_one(path) {
                issues.extend(file_issues);
                scanned += 1;
            }
        }

        (issues, scanned)
    }

    fn scan_files_parallel(&self, files: &[PathBuf]) -> (Vec<Issue>, usize) {
        let results: Vec<Option<Vec<Issue>>> = files
            .par_iter()
            .map(|path| {
                if self.cancel.is_cancelled() {
                    return None;
                }
                self.scan_one(path)
            })
            .collect();

        let scanned = results.iter().filter(|r| r.is_some()).count();
        let issues = results.into_iter().flatten().flatten().collect();
        (issues, scanned)
    }

    fn scan_one(&self, path: &Path) -> Option<Vec<Issue>> {
        match self.engine.scan_file(path, &self.root) {
            Ok(issues) => Some(issues),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable file");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanError;
    use crate::rules::Category;
    use std::fs;
    use tempfile::TempDir;

    fn create_project() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("math.cpp"),
            "#include <xmmintrin.h>\n\nvoid f() {\n    __m128 r = _mm_add_ps(a, b);\n}\n",
        )
        .unwrap();
        fs::write(dir.path().join("plain.py"), "print('hello')\n").unwrap();
        fs::write(dir.path().join("requirements.txt"), "numpy==1.21.0\n").unwrap();
        fs::write(dir.path().join("CMakeLists.txt"), "project(app)\n").unwrap();
        dir
    }

    #[test]
    fn test_scan_produces_full_report() {
        let dir = create_project();
        let report = ProjectScanner::new(dir.path()).scan().unwrap();

        assert_eq!(report.total_files, 2);
        assert_eq!(report.scanned_files, 2);
        assert_eq!(report.issues.len(), 2);
        assert_eq!(report.dependencies.len(), 1);
        assert_eq!(report.build_systems.len(), 1);
        assert!(!report.recommendations.is_empty());
    }

    #[test]
    fn test_scanned_never_exceeds_total() {
        let dir = create_project();
        let report = ProjectScanner::new(dir.path()).scan().unwrap();
        assert!(report.scanned_files <= report.total_files);
    }

    #[test]
    fn test_missing_root_yields_no_report() {
        let err = ProjectScanner::new("/definitely/missing/root")
            .scan()
            .unwrap_err();
        assert!(matches!(err, ScanError::PathNotFound(_)));
    }

    #[test]
    fn test_issues_in_traversal_then_line_order() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("a.c"),
            "__asm__ (\"nop\");\nx = _mm_add_ps(a, b);\n",
        )
        .unwrap();
        fs::write(dir.path().join("b.c"), "GetSystemInfo(&si);\n").unwrap();

        let report = ProjectScanner::new(dir.path()).scan().unwrap();
        assert_eq!(report.issues.len(), 3);
        assert_eq!(report.issues[0].file, "a.c");
        assert_eq!(report.issues[0].line, 1);
        assert_eq!(report.issues[1].file, "a.c");
        assert_eq!(report.issues[1].line, 2);
        assert_eq!(report.issues[2].file, "b.c");
    }

    #[test]
    fn test_parallel_scan_matches_sequential_ordering() {
        let dir = create_project();
        let sequential = ProjectScanner::new(dir.path()).scan().unwrap();
        let parallel = ProjectScanner::new(dir.path())
            .with_parallel(true)
            .scan()
            .unwrap();

        assert_eq!(parallel.issues, sequential.issues);
        assert_eq!(parallel.total_files, sequential.total_files);
        assert_eq!(parallel.scanned_files, sequential.scanned_files);
    }

    #[test]
    fn test_non_recursive_skips_subdirectories() {
        let dir = create_project();
        let sub = dir.path().join("nested");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("deep.c"), "__asm__ (\"nop\");\n").unwrap();

        let report = ProjectScanner::new(dir.path())
            .with_recursive(false)
            .scan()
            .unwrap();
        assert_eq!(report.total_files, 2);
        assert!(!report.issues.iter().any(|i| i.file.contains("nested")));
    }

    #[test]
    fn test_cancelled_scan_reports_partial_results() {
        let dir = create_project();
        let cancel = CancelToken::new();
        cancel.cancel();

        let report = ProjectScanner::new(dir.path())
            .with_cancellation(cancel)
            .scan()
            .unwrap();

        assert_eq!(report.total_files, 2);
        assert_eq!(report.scanned_files, 0);
        assert!(report.issues.is_empty());
        assert!(report.dependencies.is_empty());
    }

    #[test]
    fn test_extension_rules_reach_the_scan() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("timer.c"), "QueryPerformanceCounter(&t);\n").unwrap();

        let report = ProjectScanner::new(dir.path())
            .with_rules([RuleSpec::new(
                Category::PlatformApi,
                [r"QueryPerformanceCounter"],
            )])
            .scan()
            .unwrap();

        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].category, Category::PlatformApi);
    }

    #[test]
    fn test_rescan_is_idempotent_except_timestamp() {
        let dir = create_project();
        let first = ProjectScanner::new(dir.path()).scan().unwrap();
        let second = ProjectScanner::new(dir.path()).scan().unwrap();

        assert_eq!(first.total_files, second.total_files);
        assert_eq!(first.scanned_files, second.scanned_files);
        assert_eq!(first.issues, second.issues);
        assert_eq!(first.dependencies, second.dependencies);
        assert_eq!(first.build_systems, second.build_systems);
        assert_eq!(first.recommendations, second.recommendations);
    }
}

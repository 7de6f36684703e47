//! Build-system descriptor detection.
//!
//! Matches known build-descriptor filenames anywhere in the tree. File
//! contents are never inspected; every descriptor is flagged for review.

use crate::discovery::is_excluded_dir;
use crate::error::{Result, ScanError};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildSystem {
    Cmake,
    Make,
    Gradle,
    Maven,
    Npm,
    Cargo,
    GoModules,
}

impl BuildSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildSystem::Cmake => "cmake",
            BuildSystem::Make => "make",
            BuildSystem::Gradle => "gradle",
            BuildSystem::Maven => "maven",
            BuildSystem::Npm => "npm",
            BuildSystem::Cargo => "cargo",
            BuildSystem::GoModules => "go_modules",
        }
    }

    /// Human-facing name used in recommendation text.
    pub fn display_name(&self) -> &'static str {
        match self {
            BuildSystem::Cmake => "CMake",
            BuildSystem::Make => "Make",
            BuildSystem::Gradle => "Gradle",
            BuildSystem::Maven => "Maven",
            BuildSystem::Npm => "npm",
            BuildSystem::Cargo => "Cargo",
            BuildSystem::GoModules => "Go modules",
        }
    }
}

impl std::fmt::Display for BuildSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A detected build-descriptor file. `needs_review` is always true at
/// detection time; nothing here looks inside the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSystemDescriptor {
    /// Path relative to the scan root.
    pub file: String,
    pub system: BuildSystem,
    pub needs_review: bool,
}

static DESCRIPTOR_TABLE: LazyLock<FxHashMap<&'static str, BuildSystem>> = LazyLock::new(|| {
    [
        ("CMakeLists.txt", BuildSystem::Cmake),
        ("Makefile", BuildSystem::Make),
        ("build.gradle", BuildSystem::Gradle),
        ("pom.xml", BuildSystem::Maven),
        ("package.json", BuildSystem::Npm),
        ("Cargo.toml", BuildSystem::Cargo),
        ("go.mod", BuildSystem::GoModules),
    ]
    .into_iter()
    .collect()
});

fn keep_entry(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return true;
    }
    entry
        .file_name()
        .to_str()
        .map_or(true, |name| !is_excluded_dir(name))
}

/// Walks the tree once and reports every exact-filename match. Matches at
/// different depths stay distinct entries; nothing is deduplicated.
pub struct BuildSystemDetector;

impl BuildSystemDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn detect(&self, root: &Path) -> Result<Vec<BuildSystemDescriptor>> {
        if !root.exists() {
            return Err(ScanError::PathNotFound(root.to_path_buf()));
        }

        let descriptors = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(keep_entry)
            .filter_map(|entry| match entry {
                Ok(e) => Some(e),
                Err(e) => {
                    warn!(root = %root.display(), error = %e, "Skipping unreadable entry");
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| {
                let system = e
                    .file_name()
                    .to_str()
                    .and_then(|name| DESCRIPTOR_TABLE.get(name).copied())?;
                let relative = e.path().strip_prefix(root).unwrap_or(e.path());
                Some(BuildSystemDescriptor {
                    file: relative.display().to_string(),
                    system,
                    needs_review: true,
                })
            })
            .collect();

        Ok(descriptors)
    }
}

impl Default for BuildSystemDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_detects_root_level_descriptor() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("CMakeLists.txt"), "project(app)").unwrap();

        let found = BuildSystemDetector::new().detect(dir.path()).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].file, "CMakeLists.txt");
        assert_eq!(found[0].system, BuildSystem::Cmake);
        assert!(found[0].needs_review);
    }

    #[test]
    fn test_duplicate_descriptors_at_different_depths_kept() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("CMakeLists.txt"), "project(app)").unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("CMakeLists.txt"), "add_library(sub)").unwrap();

        let found = BuildSystemDetector::new().detect(dir.path()).unwrap();
        assert_eq!(found.len(), 2);
        let files: Vec<_> = found.iter().map(|d| d.file.as_str()).collect();
        assert!(files.contains(&"CMakeLists.txt"));
        assert!(files.contains(&"sub/CMakeLists.txt"));
    }

    #[test]
    fn test_each_root_file_reported_once() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Makefile"), "all:").unwrap();

        let found = BuildSystemDetector::new().detect(dir.path()).unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_exact_filename_match_only() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Makefile.am"), "").unwrap();
        fs::write(dir.path().join("old.Makefile"), "").unwrap();
        fs::write(dir.path().join("makefile"), "").unwrap();

        let found = BuildSystemDetector::new().detect(dir.path()).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_all_known_systems_detected() {
        let dir = TempDir::new().unwrap();
        for name in [
            "CMakeLists.txt",
            "Makefile",
            "build.gradle",
            "pom.xml",
            "package.json",
            "Cargo.toml",
            "go.mod",
        ] {
            fs::write(dir.path().join(name), "").unwrap();
        }

        let found = BuildSystemDetector::new().detect(dir.path()).unwrap();
        assert_eq!(found.len(), 7);

        let systems: Vec<_> = found.iter().map(|d| d.system).collect();
        assert!(systems.contains(&BuildSystem::Gradle));
        assert!(systems.contains(&BuildSystem::Maven));
        assert!(systems.contains(&BuildSystem::GoModules));
    }

    #[test]
    fn test_excluded_dirs_do_not_contribute() {
        let dir = TempDir::new().unwrap();
        let vendored = dir.path().join("node_modules").join("pkg");
        fs::create_dir_all(&vendored).unwrap();
        fs::write(vendored.join("package.json"), "{}").unwrap();

        let found = BuildSystemDetector::new().detect(dir.path()).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_missing_root_is_path_not_found() {
        let err = BuildSystemDetector::new()
            .detect(Path::new("/definitely/missing"))
            .unwrap_err();
        assert!(matches!(err, ScanError::PathNotFound(_)));
    }

    #[test]
    fn test_build_system_as_str() {
        assert_eq!(BuildSystem::Cmake.as_str(), "cmake");
        assert_eq!(BuildSystem::GoModules.as_str(), "go_modules");
    }
}

//! Deterministic file enumeration under a scan root.

use crate::error::{Result, ScanError};
use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

/// Extensions of files the pattern engine understands. Compared against the
/// lower-cased extension.
static SUPPORTED_EXTENSIONS: LazyLock<FxHashSet<&'static str>> = LazyLock::new(|| {
    [
        "c", "cpp", "cc", "cxx", "h", "hpp", "hxx", "py", "go", "rs", "java", "cs", "js", "ts",
        "jsx", "tsx",
    ]
    .into_iter()
    .collect()
});

/// Directory names pruned entirely: version-control metadata, build output,
/// virtual environments, dependency caches, test caches.
static EXCLUDED_DIRS: LazyLock<FxHashSet<&'static str>> = LazyLock::new(|| {
    [
        ".git",
        "__pycache__",
        "node_modules",
        ".venv",
        "venv",
        "build",
        "dist",
        ".tox",
        ".pytest_cache",
    ]
    .into_iter()
    .collect()
});

pub(crate) fn is_excluded_dir(name: &str) -> bool {
    EXCLUDED_DIRS.contains(name)
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(ext.to_ascii_lowercase().as_str()))
}

fn keep_entry(entry: &DirEntry) -> bool {
    // Never prune the root itself, even if it carries an excluded name.
    if entry.depth() == 0 {
        return true;
    }
    if !entry.file_type().is_dir() {
        return true;
    }
    entry
        .file_name()
        .to_str()
        .map_or(true, |name| !is_excluded_dir(name))
}

/// Enumerates candidate source files in deterministic depth-first order.
///
/// Traversal is read-only; no file content is opened here.
pub struct FileWalker {
    root: PathBuf,
    recursive: bool,
}

impl FileWalker {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            recursive: true,
        }
    }

    /// When false, only root-level files are enumerated.
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the root and return matching file paths in traversal order.
    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        if !self.root.exists() {
            return Err(ScanError::PathNotFound(self.root.clone()));
        }
        if !self.root.is_dir() {
            return Err(ScanError::NotADirectory(self.root.clone()));
        }

        let mut walker = WalkDir::new(&self.root).sort_by_file_name();
        if !self.recursive {
            walker = walker.max_depth(1);
        }

        let files = walker
            .into_iter()
            .filter_entry(keep_entry)
            .filter_map(|entry| match entry {
                Ok(e) => Some(e),
                Err(e) => {
                    warn!(root = %self.root.display(), error = %e, "Skipping unreadable entry");
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .filter(|e| has_supported_extension(e.path()))
            .map(|e| e.into_path())
            .collect();

        Ok(files)
    }
}

//! Source document discovery by filesystem walking.
//!
//! Collects markdown documents under the source directory, pruning hidden
//! entries, `node_modules`, and anything matched by the configured
//! exclusion patterns.

use std::fs;
use std::path::{Path, PathBuf};

use sitenav_config::ExcludeSet;

use crate::error::CheckError;

/// Directory never scanned for documents.
const NODE_MODULES: &str = "node_modules";

/// Markdown document found in the source tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceDocument {
    /// Path relative to the source directory, `/`-separated (e.g., "guide/setup.md").
    pub relative: String,
    /// Absolute path on disk.
    pub path: PathBuf,
}

/// Documents discovered under a source directory.
#[derive(Debug, Default)]
pub struct SourceTree {
    documents: Vec<SourceDocument>,
    excluded: usize,
}

impl SourceTree {
    /// Scan `source_dir` recursively.
    ///
    /// Documents are sorted by relative path.
    ///
    /// # Errors
    ///
    /// Returns `CheckError::SourceDirNotFound` if the directory does not exist.
    /// Unreadable subdirectories are logged and skipped.
    pub fn scan(source_dir: &Path, excludes: &ExcludeSet) -> Result<Self, CheckError> {
        if !source_dir.is_dir() {
            return Err(CheckError::SourceDirNotFound(source_dir.to_path_buf()));
        }

        let mut tree = Self::default();
        tree.scan_directory(source_dir, "", excludes);
        tree.documents.sort_by(|a, b| a.relative.cmp(&b.relative));

        tracing::debug!(
            documents = tree.documents.len(),
            excluded = tree.excluded,
            "Source scan completed"
        );
        Ok(tree)
    }

    fn scan_directory(&mut self, dir_path: &Path, prefix: &str, excludes: &ExcludeSet) {
        let entries = match fs::read_dir(dir_path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %dir_path.display(), error = %e, "Failed to read directory");
                return;
            }
        };

        for entry in entries.filter_map(Result::ok) {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') || name == NODE_MODULES {
                continue;
            }

            let relative = if prefix.is_empty() {
                name
            } else {
                format!("{prefix}/{name}")
            };
            if excludes.is_excluded(&relative) {
                self.excluded += 1;
                continue;
            }

            let path = entry.path();
            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                self.scan_directory(&path, &relative, excludes);
            } else if path.extension().is_some_and(|e| e == "md") {
                self.documents.push(SourceDocument { relative, path });
            }
        }
    }

    /// Documents in relative-path order.
    #[must_use]
    pub fn documents(&self) -> &[SourceDocument] {
        &self.documents
    }

    /// Find a document by relative path.
    #[must_use]
    pub fn get(&self, relative: &str) -> Option<&SourceDocument> {
        self.documents
            .binary_search_by(|d| d.relative.as_str().cmp(relative))
            .ok()
            .map(|i| &self.documents[i])
    }

    /// Number of entries pruned by exclusion patterns.
    #[must_use]
    pub fn excluded(&self) -> usize {
        self.excluded
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

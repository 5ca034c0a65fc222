//! Source tree scanning
//!
//! The scanner walks an export directory and yields every entry below it in
//! a stable order. [`PostSet`] then sorts those entries into post candidates
//! and the sidecar records that may accompany them.

use crate::error::{MigrateError, Result};
use crate::io::fs::{is_markdown, is_sidecar};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Configuration for directory scanning
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Follow symbolic links
    pub follow_links: bool,
    /// Maximum recursion depth for directory traversal
    pub max_depth: Option<usize>,
    /// Include hidden entries (starting with .)
    pub include_hidden: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            follow_links: false,
            max_depth: None,
            include_hidden: false,
        }
    }
}

/// Directory scanner over an export tree
pub struct Scanner {
    config: ScannerConfig,
}

impl Scanner {
    pub fn new() -> Self {
        Self {
            config: ScannerConfig::default(),
        }
    }

    pub fn with_config(config: ScannerConfig) -> Self {
        Self { config }
    }

    /// Every file and directory below `root`, sorted by path.
    ///
    /// Any traversal error aborts the scan (code 8).
    pub fn scan(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(MigrateError::scan_failed(root, "not a directory"));
        }

        let walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(self.config.follow_links)
            .max_depth(self.config.max_depth.unwrap_or(usize::MAX))
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || self.config.include_hidden || !is_hidden(e.path()));

        let mut entries = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| MigrateError::scan_failed(root, e.to_string()))?;
            entries.push(entry.into_path());
        }

        entries.sort();
        Ok(entries)
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Post candidates and the sidecar records seen alongside them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostSet {
    pub posts: Vec<PathBuf>,
    pub sidecars: HashSet<PathBuf>,
}

impl PostSet {
    /// Split scanned paths into posts (`.md`) and sidecars (`.json`),
    /// keeping the scan order of posts
    pub fn from_paths<I>(paths: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut set = Self::default();
        for path in paths {
            if is_markdown(&path) {
                set.posts.push(path);
            } else if is_sidecar(&path) {
                set.sidecars.insert(path);
            }
        }
        set
    }

    /// Keep only the last `n` posts
    pub fn keep_last(&mut self, n: usize) {
        let len = self.posts.len();
        if n < len {
            self.posts.drain(..len - n);
        }
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

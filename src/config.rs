//! Per-run configuration
//!
//! A [`MigrateConfig`] is built once from the resolved command-line
//! arguments and then passed by reference to every component.

use crate::error::{MigrateError, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrateConfig {
    /// Post file or export directory to convert
    pub source: PathBuf,
    /// Destination root, always absolute
    pub destination: PathBuf,
    /// Replace posts that already exist at the destination
    pub overwrite: bool,
    /// Mirror the source directory layout under the destination
    pub keep_dir_struct: bool,
    /// Keep sidecars of converted posts out of the destination, and lay
    /// posts out relative to the destination root
    pub not_sync_meta_file: bool,
    /// Only process the last N posts
    pub limit: Option<usize>,
    /// Report informational diagnostics as warnings
    pub verbose: bool,
}

impl MigrateConfig {
    /// Build a configuration, rejecting missing paths (code 9).
    ///
    /// A relative destination is resolved against the current directory.
    pub fn new(source: Option<PathBuf>, destination: Option<PathBuf>) -> Result<Self> {
        let source = source
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| MigrateError::cli_args("a source path to convert is required"))?;
        let destination = destination
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| MigrateError::cli_args("a destination directory is required"))?;

        Ok(Self {
            source,
            destination: absolutize(&destination)?,
            overwrite: false,
            keep_dir_struct: false,
            not_sync_meta_file: false,
            limit: None,
            verbose: false,
        })
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_keep_dir_struct(mut self, keep: bool) -> Self {
        self.keep_dir_struct = keep;
        self
    }

    pub fn with_not_sync_meta_file(mut self, not_sync: bool) -> Self {
        self.not_sync_meta_file = not_sync;
        self
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit.filter(|&n| n > 0);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

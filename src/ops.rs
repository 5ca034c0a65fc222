//! Top-level operations: `convert` and `destroy`

use crate::batch::{ensure_destination, BatchOrchestrator, BatchResult};
use crate::config::MigrateConfig;
use crate::diagnostics::Diagnostics;
use crate::error::{MigrateError, Result};
use crate::io::fs::PostFs;
use crate::io::mirror::TreeMirror;
use crate::io::scanner::{PostSet, Scanner};
use log::info;
use std::path::Path;

/// Convert the posts under `config.source` into `config.destination`.
///
/// Errors returned here abort the run before any post is converted; per-post
/// problems are carried inside the [`BatchResult`].
pub fn convert<F: PostFs + ?Sized>(fs: &F, config: &MigrateConfig) -> Result<BatchResult> {
    convert_with(fs, config, &Scanner::new())
}

/// [`convert`] with a caller-supplied directory scanner
pub fn convert_with<F: PostFs + ?Sized>(
    fs: &F,
    config: &MigrateConfig,
    scanner: &Scanner,
) -> Result<BatchResult> {
    let mut diagnostics = Diagnostics::new(config.verbose);
    ensure_destination(fs, &config.destination, &mut diagnostics)?;

    let posts = if fs.is_file(&config.source) {
        PostSet::from_paths([config.source.clone()])
    } else {
        let entries = scanner.scan(&config.source)?;
        if config.keep_dir_struct {
            PostSet::from_paths(TreeMirror::new(fs, config).mirror(&entries, &mut diagnostics))
        } else {
            PostSet::from_paths(entries)
        }
    };

    let result = BatchOrchestrator::new(fs, config).run_with(posts, diagnostics)?;
    info!(
        "Done: {} written, {} skipped, {} failed",
        result.written(),
        result.skipped(),
        result.failed()
    );
    Ok(result)
}

/// Remove a generated file or directory tree
pub fn destroy<F: PostFs + ?Sized>(fs: &F, target: &Path) -> Result<()> {
    if target.as_os_str().is_empty() {
        return Err(MigrateError::cli_args("a target to destroy is required"));
    }
    fs.delete(target)?;
    info!("Removed {}", target.display());
    Ok(())
}

//! CLI command handlers that bridge CLI arguments to library operations

use crate::cli_bin::args::{ConvertArgs, DestroyArgs};
use log::{debug, error, info, warn};
use wp2hexo::diagnostics::Diagnostic;
use wp2hexo::error::{MigrateError, Result};
use wp2hexo::io::{LocalFs, Scanner, ScannerConfig};
use wp2hexo::{ops, BatchResult, MigrateConfig};

/// Execute the convert command.
///
/// Returns `Ok(false)` when the run completed but at least one post failed.
pub fn convert_command(args: ConvertArgs, verbose: bool) -> Result<bool> {
    debug!("Executing convert command with args: {:?}", args);

    let config = MigrateConfig::new(args.convert, args.dist)
        .map_err(report)?
        .with_overwrite(args.overwrite)
        .with_keep_dir_struct(args.keep_dir_struct)
        .with_not_sync_meta_file(args.not_sync_meta_file)
        .with_limit(args.less)
        .with_verbose(verbose);

    let scanner = Scanner::with_config(ScannerConfig::from(&args.scan));
    let result = ops::convert_with(&LocalFs::new(), &config, &scanner).map_err(report)?;

    print_summary(&result);
    Ok(!result.has_failures())
}

/// Execute the destroy command
pub fn destroy_command(args: DestroyArgs) -> Result<()> {
    debug!("Executing destroy command on {}", args.target.display());
    ops::destroy(&LocalFs::new(), &args.target).map_err(report)
}

fn print_summary(result: &BatchResult) {
    if result.reports.is_empty() {
        warn!("No posts found to convert");
        return;
    }
    info!(
        "{} posts: {} written, {} skipped, {} failed",
        result.reports.len(),
        result.written(),
        result.skipped(),
        result.failed()
    );
}

/// Log a run-level error under its diagnostic code before it aborts the run
fn report(err: MigrateError) -> MigrateError {
    error!(
        "{} {}",
        err.severity(),
        Diagnostic::new(err.code()).with_detail(err.to_string())
    );
    err
}

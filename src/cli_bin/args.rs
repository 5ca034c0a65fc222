//! Command-line argument definitions and parsing
//!
//! This module provides the CLI surface using clap, kept separate from the
//! library's configuration types.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use wp2hexo::io::ScannerConfig;

/// Main CLI application
#[derive(Parser)]
#[command(
    name = "wp2hexo",
    version,
    about = "Migrate WordPress markdown exports into a Hexo source tree",
    long_about = "wp2hexo converts exported WordPress posts (markdown files with optional \
                  JSON metadata sidecars) into Hexo posts, writing title, date, tags, \
                  categories and alias redirects into each post's front matter."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output, including informational diagnostics
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Convert posts into a Hexo tree
    Convert(ConvertArgs),
    /// Remove a generated file or directory
    Destroy(DestroyArgs),
}

/// Options controlling the directory scan
#[derive(Args, Debug, Clone)]
pub struct ScanOptions {
    /// Follow symbolic links when scanning directories
    #[arg(long)]
    pub follow_links: bool,

    /// Maximum depth for directory recursion
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Include hidden files (starting with .)
    #[arg(long)]
    pub include_hidden: bool,
}

impl From<&ScanOptions> for ScannerConfig {
    fn from(opts: &ScanOptions) -> Self {
        Self {
            follow_links: opts.follow_links,
            max_depth: opts.max_depth,
            include_hidden: opts.include_hidden,
        }
    }
}

/// Arguments for the convert command
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Post file or export directory to convert
    #[arg(short, long, value_name = "PATH")]
    pub convert: Option<PathBuf>,

    /// Destination directory
    #[arg(short, long, value_name = "DIR")]
    pub dist: Option<PathBuf>,

    /// Recreate the export's directory layout under the destination
    #[arg(long)]
    pub keep_dir_struct: bool,

    /// Replace posts that already exist at the destination
    #[arg(long)]
    pub overwrite: bool,

    /// Do not copy sidecar files of converted posts; place posts relative to the destination
    #[arg(long)]
    pub not_sync_meta_file: bool,

    /// Only convert the last N posts (0 converts all)
    #[arg(long, value_name = "N")]
    pub less: Option<usize>,

    #[command(flatten)]
    pub scan: ScanOptions,
}

/// Arguments for the destroy command
#[derive(Args, Debug)]
pub struct DestroyArgs {
    /// File or directory to remove
    pub target: PathBuf,
}

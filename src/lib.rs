//! wp2hexo: migrate WordPress markdown exports into a Hexo source tree
//!
//! An export is a directory of Markdown posts, each optionally accompanied by
//! a JSON sidecar record (`post.md` next to `post.json`) holding its title,
//! slug, date, tags, categories, status and former URL aliases. This library
//! turns every published post into a Hexo post whose front matter carries
//! that metadata, with aliases rewritten into date-prefixed redirect paths.
//!
//! # Features
//!
//! - **Sidecar or inferred metadata**: posts without a sidecar get their
//!   title from the body and their date from the `YYYY/MM/DD` directory
//! - **Per-post isolation**: one bad post is reported and the batch moves on
//! - **Numbered diagnostics** for every problem a run can hit
//! - **Collision policy**: existing posts are kept unless overwriting is on
//! - **Atomic writes** through temporary files
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use wp2hexo::{convert, LocalFs, MigrateConfig, Result};
//!
//! fn main() -> Result<()> {
//!     let config = MigrateConfig::new(
//!         Some("export/posts".into()),
//!         Some("blog/source".into()),
//!     )?
//!     .with_overwrite(true);
//!
//!     let result = convert(&LocalFs::new(), &config)?;
//!     println!("{} written, {} failed", result.written(), result.failed());
//!     Ok(())
//! }
//! ```
//!
//! ## Building Front Matter Directly
//!
//! ```rust
//! use wp2hexo::{FrontmatterBuilder, Metadata};
//! use chrono::NaiveDate;
//!
//! let meta = Metadata {
//!     title: Some("Hello".into()),
//!     slug: Some("hello".into()),
//!     date: NaiveDate::from_ymd_opt(2020, 1, 2).unwrap().and_hms_opt(11, 4, 5),
//!     ..Default::default()
//! };
//! let block = FrontmatterBuilder::new().build(&meta).unwrap();
//! assert!(block.render().starts_with("---\ntitle: \"Hello\"\n"));
//! ```
//!
//! # Architecture
//!
//! - [`core`]: pure logic (dates, metadata, front matter, destination paths)
//! - [`io`]: file-system access, scanning, reading, writing and mirroring
//! - [`batch`]: per-post pipeline and run results
//! - [`ops`]: the `convert` and `destroy` entry points
//! - [`diagnostics`] and [`error`]: numbered reporting and error types

// Public API exports
pub use error::{ErrorSeverity, MigrateError, Result};

pub use batch::{BatchOrchestrator, BatchResult, PostOutcome, PostReport, SkipReason};
pub use config::MigrateConfig;
pub use diagnostics::{Diagnostic, DiagnosticCode, Diagnostics};
pub use ops::{convert, convert_with, destroy};

// Core types
pub use core::{DestinationResolver, FrontmatterBlock, FrontmatterBuilder, Metadata, PostStatus};

// IO types
pub use io::{LocalFs, PostFs, PostSet, Scanner, ScannerConfig};

pub mod batch;
pub mod config;
pub mod core;
pub mod diagnostics;
pub mod error;
pub mod io;
pub mod ops;

// CLI components are available only in the binary, not as part of the library API

//! Error types for the wp2hexo library
//!
//! Every failure the migration pipeline can produce is a variant of
//! [`MigrateError`]. Each variant maps onto exactly one [`DiagnosticCode`],
//! which is what gets reported for the post (or the run) that failed.

use crate::diagnostics::DiagnosticCode;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for all library operations
#[derive(Error, Debug)]
pub enum MigrateError {
    /// A sidecar field has a shape that cannot be normalized into a list
    #[error("Malformed post meta in {path}: {reason}")]
    MetaShape { path: PathBuf, reason: String },

    /// An alias entry cannot be URL-decoded
    #[error("Malformed alias {alias:?}: {reason}")]
    MalformedAlias { alias: String, reason: String },

    #[error("Post is missing a title")]
    MissingTitle,

    #[error("Post is missing a slug")]
    MissingSlug,

    #[error("Post is missing a date")]
    MissingDate,

    #[error("Post has no content: {path}")]
    EmptyBody { path: PathBuf },

    /// Writing the converted post failed
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory scan of the source tree failed
    #[error("Failed to scan {path}: {reason}")]
    ScanFailed { path: PathBuf, reason: String },

    /// Required command-line arguments are missing
    #[error("Invalid command-line arguments: {reason}")]
    CliArgs { reason: String },

    /// The sidecar record is not valid JSON (or not a JSON object)
    #[error("Invalid post meta JSON in {path}: {reason}")]
    SidecarParse { path: PathBuf, reason: String },

    /// The destination root cannot be used
    #[error("Destination {path} is unusable: {reason}")]
    DestinationUnusable { path: PathBuf, reason: String },

    /// Destination path computation failed
    #[error("Path resolution error: {reason}")]
    PathResolution { reason: String },

    /// I/O related errors not covered by a more specific variant
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, MigrateError>;

impl MigrateError {
    /// Create a new meta shape error
    pub fn meta_shape(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MetaShape {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new write failure
    pub fn write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a new scan failure
    pub fn scan_failed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ScanFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new CLI argument error
    pub fn cli_args(reason: impl Into<String>) -> Self {
        Self::CliArgs {
            reason: reason.into(),
        }
    }

    /// Create a new sidecar parse error
    pub fn sidecar_parse(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::SidecarParse {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new unusable destination error
    pub fn destination_unusable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::DestinationUnusable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new path resolution error
    pub fn path_resolution(reason: impl Into<String>) -> Self {
        Self::PathResolution {
            reason: reason.into(),
        }
    }

    /// The diagnostic code reported for this error
    pub fn code(&self) -> DiagnosticCode {
        match self {
            Self::MetaShape { .. } | Self::MalformedAlias { .. } => DiagnosticCode::MetaShape,
            Self::MissingTitle => DiagnosticCode::MissingTitle,
            Self::MissingSlug => DiagnosticCode::MissingSlug,
            Self::MissingDate => DiagnosticCode::MissingDate,
            Self::EmptyBody { .. } => DiagnosticCode::EmptyBody,
            Self::WriteFailed { .. } => DiagnosticCode::WriteFailed,
            Self::ScanFailed { .. } => DiagnosticCode::ScanFailed,
            Self::CliArgs { .. } => DiagnosticCode::CliArgs,
            Self::SidecarParse { .. } => DiagnosticCode::SidecarParse,
            Self::DestinationUnusable { .. } => DiagnosticCode::DestinationUnusable,
            Self::PathResolution { .. } | Self::Io(_) => DiagnosticCode::StageFailed,
        }
    }

    /// Get the error severity level
    pub fn severity(&self) -> ErrorSeverity {
        if self.code().is_run_level() {
            ErrorSeverity::Run
        } else {
            ErrorSeverity::Post
        }
    }

    /// Check if processing can continue with the next post after this error
    pub fn is_recoverable(&self) -> bool {
        self.severity() == ErrorSeverity::Post
    }
}

/// How far an error reaches
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Fails a single post
    Post,
    /// Aborts the whole run
    Run,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Post => write!(f, "POST"),
            Self::Run => write!(f, "RUN"),
        }
    }
}

//! Diagnostic codes and the append-only diagnostic stream
//!
//! Every condition the migration reports, fatal or not, is a [`Diagnostic`]
//! carrying a numeric [`DiagnosticCode`]. Diagnostics are logged the moment
//! they are recorded and kept in order for the final [`crate::BatchResult`].

use log::{debug, error, warn};
use std::fmt;
use std::path::{Path, PathBuf};

/// Numeric diagnostic codes, stable across releases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DiagnosticCode {
    MetaShape = 1,
    MissingTitle = 2,
    MissingSlug = 3,
    MissingDate = 4,
    EmptyBody = 5,
    AlreadyExists = 6,
    WriteFailed = 7,
    ScanFailed = 8,
    CliArgs = 9,
    SidecarParse = 10,
    DateFallback = 11,
    DestinationUnusable = 12,
    DestinationCreated = 13,
    DateInferred = 14,
    StageFailed = 15,
}

impl DiagnosticCode {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Informational codes never mark a post as failed
    pub fn is_informational(self) -> bool {
        matches!(
            self,
            Self::AlreadyExists | Self::DestinationCreated | Self::DateInferred
        )
    }

    /// Codes that abort the whole run before any post is processed
    pub fn is_run_level(self) -> bool {
        matches!(
            self,
            Self::ScanFailed | Self::CliArgs | Self::DestinationUnusable
        )
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::MetaShape => "post meta has an unexpected shape",
            Self::MissingTitle => "post is missing a title",
            Self::MissingSlug => "post is missing a slug",
            Self::MissingDate => "post is missing a date",
            Self::EmptyBody => "post has no content",
            Self::AlreadyExists => "post already exists at destination",
            Self::WriteFailed => "failed to write post",
            Self::ScanFailed => "failed to scan source directory",
            Self::CliArgs => "invalid command-line arguments",
            Self::SidecarParse => "post meta is not valid JSON",
            Self::DateFallback => "post date unusable, fallback applied",
            Self::DestinationUnusable => "destination root is unusable",
            Self::DestinationCreated => "destination did not exist, created it",
            Self::DateInferred => "post meta has no date, inferred one",
            Self::StageFailed => "post conversion failed",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:02}] {}", self.as_u8(), self.description())
    }
}

/// A single reported condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    /// The post being processed, if any
    pub post: Option<PathBuf>,
    /// The destination involved, if any
    pub dist: Option<PathBuf>,
    /// Underlying error message or extra context
    pub detail: Option<String>,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode) -> Self {
        Self {
            code,
            post: None,
            dist: None,
            detail: None,
        }
    }

    pub fn with_post(mut self, post: impl Into<PathBuf>) -> Self {
        self.post = Some(post.into());
        self
    }

    pub fn with_dist(mut self, dist: impl Into<PathBuf>) -> Self {
        self.dist = Some(dist.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)?;
        if let Some(post) = &self.post {
            write!(f, ": {}", post.display())?;
        }
        if let Some(dist) = &self.dist {
            write!(f, " -> {}", dist.display())?;
        }
        if let Some(detail) = &self.detail {
            write!(f, " ({})", detail)?;
        }
        Ok(())
    }
}

/// Append-only diagnostic stream shared by one run
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
    show_warnings: bool,
}

impl Diagnostics {
    /// Informational diagnostics are logged at `warn` only when `show_warnings` is set
    pub fn new(show_warnings: bool) -> Self {
        Self {
            entries: Vec::new(),
            show_warnings,
        }
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        if diagnostic.code.is_informational() {
            if self.show_warnings {
                warn!("{}", diagnostic);
            } else {
                debug!("{}", diagnostic);
            }
        } else {
            error!("{}", diagnostic);
        }
        self.entries.push(diagnostic);
    }

    /// Shorthand for a diagnostic about one post
    pub fn report(&mut self, code: DiagnosticCode, post: &Path) {
        self.push(Diagnostic::new(code).with_post(post));
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }

    pub fn count(&self, code: DiagnosticCode) -> usize {
        self.entries.iter().filter(|d| d.code == code).count()
    }
}

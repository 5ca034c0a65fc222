//! Batch orchestration
//!
//! [`BatchOrchestrator`] walks a [`PostSet`] strictly in order. For each
//! post it decides once whether a sidecar exists, resolves metadata, builds
//! the front matter, computes the destination and writes the result. A
//! failing post is recorded and the batch moves on to the next one; only a
//! destination root that cannot be used stops the run, and it does so
//! before the first post.

use crate::config::MigrateConfig;
use crate::core::destination::DestinationResolver;
use crate::core::frontmatter::FrontmatterBuilder;
use crate::diagnostics::{Diagnostic, DiagnosticCode, Diagnostics};
use crate::error::{MigrateError, Result};
use crate::io::fs::PostFs;
use crate::io::reader::{read_post, MetadataResolver, Resolution};
use crate::io::scanner::PostSet;
use crate::io::writer::{PostWriter, WriteOutcome};
use log::{debug, info};
use std::path::{Path, PathBuf};

pub const SIDECAR_EXTENSION: &str = "json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The sidecar status is not `published`
    Unpublished,
    /// The destination exists and overwriting is off
    AlreadyExists,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostOutcome {
    Written(PathBuf),
    Skipped(SkipReason),
    Failed(DiagnosticCode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostReport {
    pub post: PathBuf,
    pub outcome: PostOutcome,
}

/// Outcomes of one run, in processing order
#[derive(Debug, Default)]
pub struct BatchResult {
    pub reports: Vec<PostReport>,
    pub diagnostics: Vec<Diagnostic>,
}

impl BatchResult {
    pub fn written(&self) -> usize {
        self.count(|o| matches!(o, PostOutcome::Written(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, PostOutcome::Skipped(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, PostOutcome::Failed(_)))
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    /// Diagnostics carrying `code`
    pub fn diagnostics_with(&self, code: DiagnosticCode) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.code == code)
    }

    fn count(&self, pred: impl Fn(&PostOutcome) -> bool) -> usize {
        self.reports.iter().filter(|r| pred(&r.outcome)).count()
    }
}

/// Sidecar record expected next to `post`
pub fn sidecar_path(post: &Path) -> PathBuf {
    post.with_extension(SIDECAR_EXTENSION)
}

/// Make sure the destination root is a directory, creating it if needed.
///
/// A root that is not a directory, or cannot be created, is fatal (code 12).
pub fn ensure_destination<F: PostFs + ?Sized>(
    fs: &F,
    destination: &Path,
    diagnostics: &mut Diagnostics,
) -> Result<()> {
    if fs.is_dir(destination) {
        return Ok(());
    }
    if fs.exists(destination) {
        return Err(MigrateError::destination_unusable(
            destination,
            "exists and is not a directory",
        ));
    }

    fs.create_dir_all(destination)
        .map_err(|e| MigrateError::destination_unusable(destination, e.to_string()))?;
    diagnostics.push(Diagnostic::new(DiagnosticCode::DestinationCreated).with_dist(destination));
    Ok(())
}

pub struct BatchOrchestrator<'a, F: PostFs + ?Sized> {
    fs: &'a F,
    config: &'a MigrateConfig,
    builder: FrontmatterBuilder,
}

impl<'a, F: PostFs + ?Sized> BatchOrchestrator<'a, F> {
    pub fn new(fs: &'a F, config: &'a MigrateConfig) -> Self {
        Self {
            fs,
            config,
            builder: FrontmatterBuilder::new(),
        }
    }

    pub fn with_builder(mut self, builder: FrontmatterBuilder) -> Self {
        self.builder = builder;
        self
    }

    /// Process `posts` with a fresh diagnostic stream
    pub fn run(&self, posts: PostSet) -> Result<BatchResult> {
        self.run_with(posts, Diagnostics::new(self.config.verbose))
    }

    /// Process `posts`, appending to an existing diagnostic stream
    pub fn run_with(
        &self,
        mut posts: PostSet,
        mut diagnostics: Diagnostics,
    ) -> Result<BatchResult> {
        if let Some(limit) = self.config.limit {
            posts.keep_last(limit);
        }

        ensure_destination(self.fs, &self.config.destination, &mut diagnostics)?;
        info!("Converting {} post(s)", posts.len());

        let mut reports = Vec::with_capacity(posts.len());
        for post in &posts.posts {
            let candidate = sidecar_path(post);
            let has_sidecar = posts.sidecars.contains(&candidate) || self.fs.exists(&candidate);
            let sidecar = has_sidecar.then_some(candidate.as_path());

            let outcome = match self.process(post, sidecar, &mut diagnostics) {
                Ok(outcome) => outcome,
                Err(err) => {
                    let code = err.code();
                    diagnostics.push(
                        Diagnostic::new(code)
                            .with_post(post)
                            .with_detail(err.to_string()),
                    );
                    PostOutcome::Failed(code)
                }
            };
            debug!("{}: {:?}", post.display(), outcome);

            reports.push(PostReport {
                post: post.clone(),
                outcome,
            });
        }

        Ok(BatchResult {
            reports,
            diagnostics: diagnostics.into_entries(),
        })
    }

    /// The per-post pipeline: resolve, build, locate, write
    fn process(
        &self,
        post: &Path,
        sidecar: Option<&Path>,
        diagnostics: &mut Diagnostics,
    ) -> Result<PostOutcome> {
        let record = read_post(self.fs, post)?;

        let resolution = MetadataResolver::new(self.fs).resolve(&record, sidecar, diagnostics)?;
        let metadata = match resolution {
            Resolution::Unpublished => return Ok(PostOutcome::Skipped(SkipReason::Unpublished)),
            Resolution::Ready(metadata) => metadata,
        };

        let frontmatter = self.builder.build(&metadata)?;

        if record.body.is_empty() {
            return Err(MigrateError::EmptyBody {
                path: post.to_path_buf(),
            });
        }

        let dest = DestinationResolver::new(self.config).resolve(post, frontmatter.slug())?;

        let writer = PostWriter::new(self.fs, self.config.overwrite);
        Ok(match writer.write(post, &dest, &frontmatter, &record.body, diagnostics)? {
            WriteOutcome::Written { path, .. } => PostOutcome::Written(path),
            WriteOutcome::Skipped { .. } => PostOutcome::Skipped(SkipReason::AlreadyExists),
        })
    }
}

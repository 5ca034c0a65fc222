//! Post reading and metadata resolution
//!
//! [`read_post`] loads a Markdown body, and [`MetadataResolver`] produces
//! the post's canonical metadata, either from its sidecar record or, when
//! there is none, synthesized from the file's location and content.

use crate::core::date;
use crate::core::metadata::{self, Metadata, SidecarDate, SidecarRecord};
use crate::diagnostics::{Diagnostic, DiagnosticCode, Diagnostics};
use crate::error::{MigrateError, Result};
use crate::io::fs::PostFs;
use chrono::NaiveDateTime;
use gray_matter::engine::YAML;
use gray_matter::{Matter, Pod};
use log::debug;
use std::path::{Path, PathBuf};

/// Raw Markdown of one post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    pub source_path: PathBuf,
    pub body: String,
}

/// Read a post, dropping any front matter block it already carries
pub fn read_post<F: PostFs + ?Sized>(fs: &F, path: &Path) -> Result<PostRecord> {
    let content = fs.read_to_string(path)?;
    Ok(PostRecord {
        source_path: path.to_path_buf(),
        body: strip_front_matter(content),
    })
}

fn strip_front_matter(content: String) -> String {
    if !content.starts_with("---") {
        return content;
    }

    let matter = Matter::<YAML>::new();
    let parsed = matter.parse(&content);
    match parsed.data {
        Some(Pod::Hash(_)) => parsed.content,
        _ => content,
    }
}

/// Outcome of metadata resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The sidecar marks the post as not published; skip it quietly
    Unpublished,
    Ready(Metadata),
}

pub struct MetadataResolver<'a, F: PostFs + ?Sized> {
    fs: &'a F,
}

impl<'a, F: PostFs + ?Sized> MetadataResolver<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self { fs }
    }

    /// Resolve metadata for `post`, from `sidecar` when the post has one
    pub fn resolve(
        &self,
        post: &PostRecord,
        sidecar: Option<&Path>,
        diagnostics: &mut Diagnostics,
    ) -> Result<Resolution> {
        match sidecar {
            Some(sidecar) => self.from_sidecar(post, sidecar, diagnostics),
            None => Ok(Resolution::Ready(self.virtual_metadata(post, diagnostics))),
        }
    }

    fn from_sidecar(
        &self,
        post: &PostRecord,
        sidecar: &Path,
        diagnostics: &mut Diagnostics,
    ) -> Result<Resolution> {
        let content = self
            .fs
            .read_to_string(sidecar)
            .map_err(|e| MigrateError::sidecar_parse(sidecar, e.to_string()))?;
        let (mut meta, date_state) =
            SidecarRecord::from_json(&content, sidecar)?.into_metadata(sidecar)?;

        if !meta.is_published() {
            debug!("Skipping unpublished post {}", post.source_path.display());
            return Ok(Resolution::Unpublished);
        }

        match date_state {
            SidecarDate::Parsed => {}
            SidecarDate::Missing => match self.infer_date(&post.source_path) {
                Ok(inferred) => {
                    meta.date = Some(inferred);
                    diagnostics.report(DiagnosticCode::DateInferred, &post.source_path);
                }
                Err(reason) => debug!(
                    "Could not infer a date for {}: {}",
                    post.source_path.display(),
                    reason
                ),
            },
            SidecarDate::Unparseable(raw) => {
                diagnostics.push(
                    Diagnostic::new(DiagnosticCode::DateFallback)
                        .with_post(&post.source_path)
                        .with_detail(format!("unparseable date {}", raw)),
                );
                meta.date = self.infer_date(&post.source_path).ok();
            }
        }

        Ok(Resolution::Ready(meta))
    }

    /// Metadata for a post without a sidecar
    fn virtual_metadata(&self, post: &PostRecord, diagnostics: &mut Diagnostics) -> Metadata {
        let date = self.infer_date(&post.source_path).unwrap_or_else(|reason| {
            diagnostics.push(
                Diagnostic::new(DiagnosticCode::DateFallback)
                    .with_post(&post.source_path)
                    .with_detail(reason),
            );
            date::now()
        });

        let slug = metadata::slug_from_path(&post.source_path);
        let title = slug
            .as_deref()
            .map(|slug| metadata::infer_title(&post.body, slug));

        Metadata {
            title,
            slug,
            date: Some(date),
            ..Default::default()
        }
    }

    /// Date from a `YYYY/MM/DD` directory, else the file's change time
    fn infer_date(&self, post: &Path) -> std::result::Result<NaiveDateTime, String> {
        if let Some(from_dir) = date::date_from_dir(post)? {
            return Ok(from_dir);
        }
        self.fs
            .changed_at(post)
            .map(date::local_from_system_time)
            .map_err(|e| e.to_string())
    }
}

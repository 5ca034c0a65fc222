//! Writing converted posts
//!
//! The writer joins a front matter block with the post body (minus its
//! leading heading, which the front matter now carries) and applies the
//! run's collision policy: existing posts are skipped unless overwriting
//! is enabled.

use crate::core::frontmatter::FrontmatterBlock;
use crate::diagnostics::{Diagnostic, DiagnosticCode, Diagnostics};
use crate::error::{MigrateError, Result};
use crate::io::fs::PostFs;
use log::debug;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Result of a write attempt that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The post was written; `replaced` when a previous version was overwritten
    Written { path: PathBuf, replaced: bool },
    /// The destination already existed and overwriting is disabled
    Skipped { path: PathBuf },
}

pub struct PostWriter<'a, F: PostFs + ?Sized> {
    fs: &'a F,
    overwrite: bool,
}

impl<'a, F: PostFs + ?Sized> PostWriter<'a, F> {
    pub fn new(fs: &'a F, overwrite: bool) -> Self {
        Self { fs, overwrite }
    }

    pub fn write(
        &self,
        post: &Path,
        dest: &Path,
        frontmatter: &FrontmatterBlock,
        body: &str,
        diagnostics: &mut Diagnostics,
    ) -> Result<WriteOutcome> {
        let exists = self
            .fs
            .try_exists(dest)
            .map_err(|e| MigrateError::write_failed(dest, e))?;

        if exists && !self.overwrite {
            diagnostics.push(
                Diagnostic::new(DiagnosticCode::AlreadyExists)
                    .with_post(post)
                    .with_dist(dest),
            );
            return Ok(WriteOutcome::Skipped {
                path: dest.to_path_buf(),
            });
        }

        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.fs
                .create_dir_all(parent)
                .map_err(|e| MigrateError::write_failed(dest, e))?;
        }

        let mut content = frontmatter.render();
        content.push_str(strip_leading_heading(body));
        self.fs
            .write(dest, &content)
            .map_err(|e| MigrateError::write_failed(dest, e))?;

        debug!("Wrote {} -> {}", post.display(), dest.display());
        Ok(WriteOutcome::Written {
            path: dest.to_path_buf(),
            replaced: exists,
        })
    }
}

/// Drop one leading Markdown heading line (and any blank space before it)
pub fn strip_leading_heading(body: &str) -> &str {
    static HEADING: OnceLock<Regex> = OnceLock::new();
    let heading =
        HEADING.get_or_init(|| Regex::new(r"^\s*#[^\n]*\S[^\n]*\n").expect("valid regex"));
    match heading.find(body) {
        Some(m) => &body[m.end()..],
        None => body,
    }
}

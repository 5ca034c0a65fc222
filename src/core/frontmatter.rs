//! Hexo front matter construction
//!
//! [`FrontmatterBuilder`] turns canonical [`Metadata`] into the block that
//! is prepended to each migrated post:
//!
//! ```text
//! ---
//! title: "Hello"
//! date: "2020-01-02 11:04:05"
//! tags: ["a"]
//! alias:
//!     - "/2020/01/02/old-url.html"
//! ---
//!
//! ```
//!
//! Alias entries become redirects under the post's `/YYYY/MM/DD` directory.

use crate::core::date;
use crate::core::metadata::Metadata;
use crate::error::{MigrateError, Result};
use chrono::NaiveDateTime;
use log::info;
use std::fmt;

pub const DELIMITER: &str = "---";

/// Suffix of the permalinks aliases redirect to
pub const DEFAULT_SUFFIX: &str = ".html";

/// A rendered-ready front matter block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontmatterBlock {
    lines: Vec<String>,
    slug: String,
    date: NaiveDateTime,
}

impl FrontmatterBlock {
    /// Lines between the delimiters
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Slug after alias-driven suffix correction
    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn date(&self) -> NaiveDateTime {
        self.date
    }

    /// The exact bytes written ahead of the post body, ending in an empty line
    pub fn render(&self) -> String {
        let capacity = self.lines.iter().map(|l| l.len() + 1).sum::<usize>() + 10;
        let mut out = String::with_capacity(capacity);
        out.push_str(DELIMITER);
        out.push('\n');
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(DELIMITER);
        out.push_str("\n\n");
        out
    }
}

impl fmt::Display for FrontmatterBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Builds front matter blocks from metadata
#[derive(Debug, Clone)]
pub struct FrontmatterBuilder {
    suffix: String,
    malformed_suffix: String,
}

impl FrontmatterBuilder {
    pub fn new() -> Self {
        Self::with_suffix(DEFAULT_SUFFIX)
    }

    /// Use a different permalink suffix; its malformed variant swaps the
    /// extension dot for a dash (`.html` -> `-html`)
    pub fn with_suffix(suffix: &str) -> Self {
        Self {
            suffix: suffix.to_string(),
            malformed_suffix: suffix.replacen('.', "-", 1),
        }
    }

    /// Validate `metadata` and emit its block.
    ///
    /// Title, slug and date are checked in that order; the first missing one
    /// fails the post.
    pub fn build(&self, metadata: &Metadata) -> Result<FrontmatterBlock> {
        let title = non_empty(metadata.title.as_deref()).ok_or(MigrateError::MissingTitle)?;
        let slug = non_empty(metadata.slug.as_deref()).ok_or(MigrateError::MissingSlug)?;
        let date = metadata.date.ok_or(MigrateError::MissingDate)?;

        let mut lines = vec![
            format!("title: \"{}\"", escape_quoted(title)),
            format!("date: \"{}\"", date::format_date(&date)),
        ];

        if !metadata.tags.is_empty() {
            lines.push(format!("tags: {}", json_array(&metadata.tags)));
        }
        if !metadata.categories.is_empty() {
            lines.push(format!("categories: {}", json_array(&metadata.categories)));
        }

        let (redirects, slug) = self.process_aliases(&metadata.alias, slug, &date)?;
        if !redirects.is_empty() {
            lines.push("alias:".to_string());
            lines.extend(
                redirects
                    .iter()
                    .map(|r| format!("    - \"{}\"", escape_quoted(r))),
            );
        }

        Ok(FrontmatterBlock { lines, slug, date })
    }

    /// Returns the redirect targets and the (possibly corrected) slug
    fn process_aliases(
        &self,
        aliases: &[String],
        slug: &str,
        date: &NaiveDateTime,
    ) -> Result<(Vec<String>, String)> {
        let base = date::redirect_base(date);
        let mut slug = slug.to_string();
        let mut redirects = Vec::with_capacity(aliases.len());

        for raw in aliases {
            let alias = urlencoding::decode(raw).map_err(|e| MigrateError::MalformedAlias {
                alias: raw.clone(),
                reason: e.to_string(),
            })?;
            if contains_cjk(&alias) {
                info!("Alias contains CJK characters: {}", alias);
            }

            if alias.ends_with(&self.suffix) {
                redirects.push(format!("{}/{}", base, alias));
            } else if alias.ends_with(&self.malformed_suffix) {
                if let Some(stem) = slug.strip_suffix(self.malformed_suffix.as_str()) {
                    slug = format!("{}{}", stem, self.suffix);
                    info!("Corrected malformed suffix, slug is now {}", slug);
                }
                redirects.push(format!("{}/{}", base, alias));
            } else {
                redirects.push(format!("{}/{}{}", base, alias, self.suffix));
            }
        }

        Ok((redirects, slug))
    }
}

impl Default for FrontmatterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn escape_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn json_array(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

fn contains_cjk(s: &str) -> bool {
    s.chars().any(|c| ('\u{4e00}'..='\u{9fa5}').contains(&c))
}

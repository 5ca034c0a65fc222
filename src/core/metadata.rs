//! Canonical post metadata
//!
//! A post's metadata either comes from its JSON sidecar record or is
//! synthesized from the Markdown file itself ("virtual" metadata). Both
//! routes end in the same [`Metadata`] value consumed by the front matter
//! builder.

use crate::core::date;
use crate::error::{MigrateError, Result};
use chrono::NaiveDateTime;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use std::sync::OnceLock;

/// Number of characters kept when a post's first line has no natural end
const UNTERMINATED_TITLE_CHARS: usize = 10;

/// Full-width period ending the first sentence of CJK text
const FULL_WIDTH_PERIOD: char = '。';

/// Publication status carried by a sidecar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostStatus {
    Published,
    Other(String),
}

impl PostStatus {
    pub fn parse(raw: &str) -> Self {
        if raw == "published" {
            Self::Published
        } else {
            Self::Other(raw.to_string())
        }
    }
}

/// Canonical metadata of one post
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub date: Option<NaiveDateTime>,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
    pub alias: Vec<String>,
    pub status: Option<PostStatus>,
}

impl Metadata {
    /// Posts without a status are treated as published
    pub fn is_published(&self) -> bool {
        matches!(self.status, None | Some(PostStatus::Published))
    }
}

/// How the `date` field of a sidecar turned out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidecarDate {
    Parsed,
    Missing,
    Unparseable(String),
}

/// Sidecar record as exported, before normalization
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SidecarRecord {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub date: Option<Value>,
    #[serde(alias = "tag")]
    pub tags: Option<Value>,
    #[serde(alias = "category")]
    pub categories: Option<Value>,
    pub alias: Option<Value>,
    pub status: Option<String>,
}

impl SidecarRecord {
    /// Parse a sidecar from its JSON text.
    ///
    /// Invalid JSON or a non-object document is a parse failure (code 10);
    /// fields of the wrong type are a shape failure (code 1).
    pub fn from_json(content: &str, path: &Path) -> Result<Self> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| MigrateError::sidecar_parse(path, e.to_string()))?;
        if !value.is_object() {
            return Err(MigrateError::sidecar_parse(path, "expected a JSON object"));
        }
        serde_json::from_value(value).map_err(|e| MigrateError::meta_shape(path, e.to_string()))
    }

    /// Normalize into [`Metadata`]; the date is left for the caller to infer
    /// when it is missing or unusable.
    pub fn into_metadata(self, path: &Path) -> Result<(Metadata, SidecarDate)> {
        let (date, date_state) = match self.date {
            None => (None, SidecarDate::Missing),
            Some(raw) if is_blank_date(&raw) => (None, SidecarDate::Missing),
            Some(raw) => match date::parse_sidecar_date(&raw) {
                Some(parsed) => (Some(parsed), SidecarDate::Parsed),
                None => (None, SidecarDate::Unparseable(raw.to_string())),
            },
        };

        let metadata = Metadata {
            title: self.title,
            slug: self.slug,
            date,
            tags: string_list(self.tags, "tags", path)?,
            categories: string_list(self.categories, "categories", path)?,
            alias: string_list(self.alias, "alias", path)?,
            status: self.status.as_deref().map(PostStatus::parse),
        };
        Ok((metadata, date_state))
    }
}

/// Null, `""`, `0` and `false` all mean the export recorded no date
fn is_blank_date(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Bool(b) => !b,
        _ => false,
    }
}

/// Accept a string or a list of strings, dropping empty entries
fn string_list(value: Option<Value>, field: &str, path: &Path) -> Result<Vec<String>> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(s)) => Ok(if s.is_empty() { Vec::new() } else { vec![s] }),
        Some(Value::Array(items)) => {
            let mut list = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(s) if s.is_empty() => {}
                    Value::String(s) => list.push(s),
                    Value::Null => {}
                    other => {
                        return Err(MigrateError::meta_shape(
                            path,
                            format!("`{}` entries must be strings, found {}", field, other),
                        ))
                    }
                }
            }
            Ok(list)
        }
        Some(other) => Err(MigrateError::meta_shape(
            path,
            format!("`{}` must be a string or a list, found {}", field, other),
        )),
    }
}

/// Slug of a post without a sidecar: its file name minus the extension
pub fn slug_from_path(post: &Path) -> Option<String> {
    post.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
}

/// Title of a post without a sidecar.
///
/// The first Markdown heading wins. Otherwise the first line is used, cut
/// at the first full-width period; text with neither a line break nor a
/// period is cut to a few characters. Empty bodies fall back to the slug.
pub fn infer_title(body: &str, slug: &str) -> String {
    if body.trim().is_empty() {
        return slug.to_string();
    }

    if let Some(caps) = heading_regex().captures(body) {
        return caps[1].trim_end().to_string();
    }

    let newline = body.find('\n');
    let first_line = match newline {
        Some(pos) => body[..pos].trim_end_matches('\r'),
        None => body,
    };

    match (first_line.find(FULL_WIDTH_PERIOD), newline) {
        (Some(pos), _) => first_line[..pos].to_string(),
        (None, Some(_)) => first_line.to_string(),
        (None, None) => first_line.chars().take(UNTERMINATED_TITLE_CHARS).collect(),
    }
}

fn heading_regex() -> &'static Regex {
    static HEADING: OnceLock<Regex> = OnceLock::new();
    HEADING.get_or_init(|| Regex::new(r"(?m)^[ \t]*#+[ \t]*(\S[^\r\n]*)").expect("valid regex"))
}

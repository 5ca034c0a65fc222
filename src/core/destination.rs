//! Destination path computation
//!
//! Two layouts are supported. The flat remap swaps the export's `posts`
//! directory for Hexo's `source` directory in place. The preserve-tree
//! layout (used when sidecars are not synced) places posts relative to the
//! configured destination root, collapsing a directory name that appears
//! both at the end of the destination and at the start of the post's
//! subtree.

use crate::config::MigrateConfig;
use crate::error::{MigrateError, Result};
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// Export directory holding the posts
pub const POSTS_SEGMENT: &str = "posts";

/// Hexo directory replacing [`POSTS_SEGMENT`] in the flat layout
pub const SOURCE_SEGMENT: &str = "source";

pub const MARKDOWN_EXTENSION: &str = "md";

pub struct DestinationResolver<'a> {
    config: &'a MigrateConfig,
}

impl<'a> DestinationResolver<'a> {
    pub fn new(config: &'a MigrateConfig) -> Self {
        Self { config }
    }

    /// Output file for `post`, named after its URL-decoded `slug`
    pub fn resolve(&self, post: &Path, slug: &str) -> Result<PathBuf> {
        let file_stem = urlencoding::decode(slug)
            .map_err(|e| MigrateError::path_resolution(format!("slug {:?}: {}", slug, e)))?;
        let root = self.root_for(post)?;
        Ok(root.join(format!("{}.{}", file_stem, MARKDOWN_EXTENSION)))
    }

    /// Directory the converted `post` is written into
    pub fn root_for(&self, post: &Path) -> Result<PathBuf> {
        let dir = post.parent().unwrap_or_else(|| Path::new(""));
        if self.config.not_sync_meta_file {
            Ok(self.preserved_root(dir))
        } else {
            flat_root(dir)
        }
    }

    fn preserved_root(&self, dir: &Path) -> PathBuf {
        let destination = &self.config.destination;
        let components: Vec<Component> = dir.components().collect();
        let Some(pos) = components
            .iter()
            .position(|c| c.as_os_str() == POSTS_SEGMENT)
        else {
            return destination.clone();
        };

        let subtree: PathBuf = components[pos + 1..].iter().collect();
        let first = subtree.components().next().map(|c| c.as_os_str());
        if first.is_some() && first == destination.file_name() {
            destination
                .parent()
                .unwrap_or(destination.as_path())
                .join(subtree)
        } else {
            destination.clone()
        }
    }
}

fn flat_root(dir: &Path) -> Result<PathBuf> {
    let mut replaced = false;
    let root: PathBuf = dir
        .components()
        .map(|c| {
            if !replaced && c.as_os_str() == POSTS_SEGMENT {
                replaced = true;
                Component::Normal(OsStr::new(SOURCE_SEGMENT))
            } else {
                c
            }
        })
        .collect();

    if replaced {
        Ok(root)
    } else {
        Err(MigrateError::path_resolution(format!(
            "{} has no `{}` directory to remap",
            dir.display(),
            POSTS_SEGMENT
        )))
    }
}

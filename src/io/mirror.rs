//! Mirroring the export layout into the destination
//!
//! In keep-directory-structure mode every directory of the export is
//! recreated under the destination and every non-Markdown file (images,
//! attachments, sidecars) is copied across. Markdown files are not copied:
//! they are handed back as post candidates for conversion.

use crate::config::MigrateConfig;
use crate::diagnostics::{Diagnostic, DiagnosticCode, Diagnostics};
use crate::io::fs::{is_markdown, is_sidecar, PostFs};
use log::debug;
use std::path::{Path, PathBuf};

pub struct TreeMirror<'a, F: PostFs + ?Sized> {
    fs: &'a F,
    config: &'a MigrateConfig,
}

impl<'a, F: PostFs + ?Sized> TreeMirror<'a, F> {
    pub fn new(fs: &'a F, config: &'a MigrateConfig) -> Self {
        Self { fs, config }
    }

    /// Mirror the scanned `entries` and return the Markdown files among them.
    ///
    /// With `not_sync_meta_file` set, a sidecar whose post sits next to it is
    /// not copied. Copy failures are reported and do not stop the mirror.
    pub fn mirror(&self, entries: &[PathBuf], diagnostics: &mut Diagnostics) -> Vec<PathBuf> {
        let mut posts = Vec::new();

        for entry in entries {
            let dest = self.mirrored_path(entry);

            if self.fs.is_dir(entry) {
                if let Err(e) = self.fs.create_dir_all(&dest) {
                    report_failure(diagnostics, entry, &dest, e);
                }
                continue;
            }
            if !self.fs.is_file(entry) {
                debug!("Ignoring {}", entry.display());
                continue;
            }

            if let Some(parent) = dest.parent() {
                if let Err(e) = self.fs.create_dir_all(parent) {
                    report_failure(diagnostics, entry, &dest, e);
                    continue;
                }
            }

            if is_markdown(entry) {
                posts.push(entry.clone());
            } else if self.should_copy(entry) {
                debug!("Copying {} -> {}", entry.display(), dest.display());
                if let Err(e) = self.fs.copy(entry, &dest) {
                    report_failure(diagnostics, entry, &dest, e);
                }
            }
        }

        posts
    }

    fn should_copy(&self, entry: &Path) -> bool {
        !(self.config.not_sync_meta_file
            && is_sidecar(entry)
            && self.fs.exists(&entry.with_extension("md")))
    }

    fn mirrored_path(&self, entry: &Path) -> PathBuf {
        match entry.strip_prefix(&self.config.source) {
            Ok(rel) => self.config.destination.join(rel),
            Err(_) => self.config.destination.join(entry.file_name().unwrap_or_default()),
        }
    }
}

fn report_failure(diagnostics: &mut Diagnostics, entry: &Path, dest: &Path, err: std::io::Error) {
    diagnostics.push(
        Diagnostic::new(DiagnosticCode::WriteFailed)
            .with_post(entry)
            .with_dist(dest)
            .with_detail(err.to_string()),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::fs::LocalFs;
    use crate::io::scanner::Scanner;
    use std::fs;
    use tempfile::TempDir;

    fn setup(not_sync: bool) -> (TempDir, MigrateConfig) {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("export/posts");
        fs::create_dir_all(src.join("2020/01/02")).unwrap();
        fs::create_dir_all(src.join("empty")).unwrap();
        fs::write(src.join("2020/01/02/a.md"), "# A").unwrap();
        fs::write(src.join("2020/01/02/a.json"), "{}").unwrap();
        fs::write(src.join("2020/01/02/orphan.json"), "{}").unwrap();
        fs::write(src.join("2020/01/02/pic.png"), "png").unwrap();

        let config = MigrateConfig::new(Some(src), Some(temp_dir.path().join("out")))
            .unwrap()
            .with_keep_dir_struct(true)
            .with_not_sync_meta_file(not_sync);
        (temp_dir, config)
    }

    #[test]
    fn test_mirror_copies_assets_and_returns_posts() {
        let (_temp_dir, config) = setup(false);
        let local = LocalFs::new();
        let entries = Scanner::new().scan(&config.source).unwrap();
        let mut diagnostics = Diagnostics::new(false);

        let posts = TreeMirror::new(&local, &config).mirror(&entries, &mut diagnostics);

        assert_eq!(posts, vec![config.source.join("2020/01/02/a.md")]);
        let out = &config.destination;
        assert!(out.join("empty").is_dir());
        assert!(out.join("2020/01/02/pic.png").is_file());
        assert!(out.join("2020/01/02/a.json").is_file());
        assert!(out.join("2020/01/02/orphan.json").is_file());
        assert!(!out.join("2020/01/02/a.md").exists());
        assert!(diagnostics.entries().is_empty());
    }

    #[test]
    fn test_mirror_skips_sidecars_of_posts() {
        let (_temp_dir, config) = setup(true);
        let local = LocalFs::new();
        let entries = Scanner::new().scan(&config.source).unwrap();
        let mut diagnostics = Diagnostics::new(false);

        TreeMirror::new(&local, &config).mirror(&entries, &mut diagnostics);

        let out = &config.destination;
        assert!(!out.join("2020/01/02/a.json").exists());
        assert!(out.join("2020/01/02/orphan.json").is_file());
        assert!(out.join("2020/01/02/pic.png").is_file());
    }
}

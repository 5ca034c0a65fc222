//! File-system access used by the migration pipeline
//!
//! Every component reaches the disk through [`PostFs`]. Failures are plain
//! `std::io::Error`s, so a missing file is always recognisable through
//! `ErrorKind::NotFound`.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::SystemTime;
use tempfile::NamedTempFile;

pub trait PostFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    fn exists(&self, path: &Path) -> bool;

    /// Like [`PostFs::exists`], but surfaces errors other than "not found"
    fn try_exists(&self, path: &Path) -> io::Result<bool>;

    fn is_file(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Last status change of `path`, used to date posts without any other hint
    fn changed_at(&self, path: &Path) -> io::Result<SystemTime>;

    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    fn copy(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Remove a file or a whole directory tree
    fn delete(&self, path: &Path) -> io::Result<()>;
}

/// [`PostFs`] backed by the local disk
#[derive(Debug, Clone)]
pub struct LocalFs {
    /// Write through a temporary file that replaces the target
    atomic_writes: bool,
}

impl LocalFs {
    pub fn new() -> Self {
        Self {
            atomic_writes: true,
        }
    }

    pub fn with_atomic_writes(atomic_writes: bool) -> Self {
        Self { atomic_writes }
    }

    fn write_atomic(&self, path: &Path, content: &str) -> io::Result<()> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(content.as_bytes())?;
        temp.flush()?;
        temp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl Default for LocalFs {
    fn default() -> Self {
        Self::new()
    }
}

impl PostFs for LocalFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn try_exists(&self, path: &Path) -> io::Result<bool> {
        path.try_exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    #[cfg(unix)]
    fn changed_at(&self, path: &Path) -> io::Result<SystemTime> {
        use std::os::unix::fs::MetadataExt;
        use std::time::Duration;

        let meta = fs::metadata(path)?;
        let secs = u64::try_from(meta.ctime())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "ctime before epoch"))?;
        let nanos = u32::try_from(meta.ctime_nsec()).unwrap_or(0);
        Ok(SystemTime::UNIX_EPOCH + Duration::new(secs, nanos))
    }

    #[cfg(not(unix))]
    fn changed_at(&self, path: &Path) -> io::Result<SystemTime> {
        fs::metadata(path)?.modified()
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        if self.atomic_writes {
            self.write_atomic(path, content)
        } else {
            fs::write(path, content)
        }
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::copy(from, to).map(|_| ())
    }

    fn delete(&self, path: &Path) -> io::Result<()> {
        let meta = fs::symlink_metadata(path)?;
        if meta.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        }
    }
}

/// Markdown post candidates
pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|s| s == "md" || s == "markdown")
        .unwrap_or(false)
}

/// Sidecar metadata records
pub fn is_sidecar(path: &Path) -> bool {
    path.extension().map(|s| s == "json").unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.md");
        let fs = LocalFs::new();

        assert!(!fs.try_exists(&path).unwrap());
        fs.write(&path, "hello").unwrap();
        assert!(fs.exists(&path));
        assert!(fs.try_exists(&path).unwrap());
        assert!(fs.is_file(&path));
        assert_eq!(fs.read_to_string(&path).unwrap(), "hello");

        fs.write(&path, "again").unwrap();
        assert_eq!(fs.read_to_string(&path).unwrap(), "again");
    }

    #[test]
    fn test_non_atomic_write() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.md");
        let fs = LocalFs::with_atomic_writes(false);
        fs.write(&path, "plain").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "plain");
    }

    #[test]
    fn test_not_found_is_distinguishable() {
        let temp_dir = TempDir::new().unwrap();
        let fs = LocalFs::new();
        let missing = temp_dir.path().join("missing.md");

        let err = fs.read_to_string(&missing).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        let err = fs.changed_at(&missing).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        let err = fs.delete(&missing).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_delete_tree() {
        let temp_dir = TempDir::new().unwrap();
        let fs = LocalFs::new();
        let dir = temp_dir.path().join("a/b");
        fs.create_dir_all(&dir).unwrap();
        fs.write(&dir.join("c.md"), "x").unwrap();

        fs.delete(&temp_dir.path().join("a")).unwrap();
        assert!(!fs.exists(&temp_dir.path().join("a")));
    }

    #[test]
    fn test_changed_at_is_recent() {
        let temp_dir = TempDir::new().unwrap();
        let fs = LocalFs::new();
        let path = temp_dir.path().join("a.md");
        fs.write(&path, "x").unwrap();

        let changed = fs.changed_at(&path).unwrap();
        let age = SystemTime::now().duration_since(changed).unwrap_or_default();
        assert!(age.as_secs() < 3600);
    }

    #[test]
    fn test_file_kinds() {
        assert!(is_markdown(Path::new("a.md")));
        assert!(is_markdown(Path::new("a.markdown")));
        assert!(!is_markdown(Path::new("a.json")));
        assert!(is_sidecar(Path::new("posts/a.json")));
        assert!(!is_sidecar(Path::new("posts/a.png")));
    }
}

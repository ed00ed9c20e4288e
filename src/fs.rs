//! Filesystem capability used for everything written under the output root.
//!
//! The compiler never calls `std::fs` for output directly; it goes through
//! [`OutputFs`] so the write and cleanup logic can run against [`MemoryFs`]
//! in tests. Inputs (helpers, partials, templates) are always read from disk.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

pub trait OutputFs {
    /// Create `path` and every missing ancestor. Existing directories are fine.
    fn ensure_dir_all(&mut self, path: &Path) -> io::Result<()>;

    /// Write `contents` to `path`, replacing any existing file. The parent
    /// directory must already exist.
    fn write(&mut self, path: &Path, contents: &str) -> io::Result<()>;

    /// Remove `path` and everything under it. A missing path is a no-op.
    fn remove_dir_all(&mut self, path: &Path) -> io::Result<()>;

    fn exists(&self, path: &Path) -> bool;
}

/// The real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskFs;

impl OutputFs for DiskFs {
    fn ensure_dir_all(&mut self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn write(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        std::fs::write(path, contents)
    }

    fn remove_dir_all(&mut self, path: &Path) -> io::Result<()> {
        match std::fs::remove_dir_all(path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// In-memory filesystem double.
///
/// Tracks directories and files separately so tests can assert that every
/// directory in a chain was materialized before a file landed in it.
#[derive(Debug, Default, Clone)]
pub struct MemoryFs {
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, String>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }

    pub fn read(&self, path: &Path) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    /// Files under `root`, keyed by their path relative to it.
    pub fn files_under(&self, root: &Path) -> BTreeMap<PathBuf, &str> {
        self.files
            .iter()
            .filter_map(|(path, contents)| {
                path.strip_prefix(root)
                    .ok()
                    .map(|rel| (rel.to_path_buf(), contents.as_str()))
            })
            .collect()
    }
}

impl OutputFs for MemoryFs {
    fn ensure_dir_all(&mut self, path: &Path) -> io::Result<()> {
        if self.files.contains_key(path) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} is a file", path.display()),
            ));
        }
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            self.dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    fn write(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        if self.dirs.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} is a directory", path.display()),
            ));
        }
        let parent_ok = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self.dirs.contains(parent),
            _ => true,
        };
        if !parent_ok {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("parent directory of {} does not exist", path.display()),
            ));
        }
        self.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn remove_dir_all(&mut self, path: &Path) -> io::Result<()> {
        self.dirs.retain(|d| !d.starts_with(path));
        self.files.retain(|f, _| !f.starts_with(path));
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.dirs.contains(path) || self.files.contains_key(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_ensure_is_idempotent_and_creates_ancestors() {
        let mut fs = MemoryFs::new();
        fs.ensure_dir_all(Path::new("/out/a/b")).unwrap();
        fs.ensure_dir_all(Path::new("/out/a/b")).unwrap();
        assert!(fs.is_dir(Path::new("/out")));
        assert!(fs.is_dir(Path::new("/out/a")));
        assert!(fs.is_dir(Path::new("/out/a/b")));
    }

    #[test]
    fn memory_write_requires_parent() {
        let mut fs = MemoryFs::new();
        let err = fs.write(Path::new("/out/a/page.html"), "x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);

        fs.ensure_dir_all(Path::new("/out/a")).unwrap();
        fs.write(Path::new("/out/a/page.html"), "x").unwrap();
        assert_eq!(fs.read(Path::new("/out/a/page.html")), Some("x"));
    }

    #[test]
    fn memory_remove_is_recursive_and_tolerates_missing() {
        let mut fs = MemoryFs::new();
        fs.remove_dir_all(Path::new("/out")).unwrap();

        fs.ensure_dir_all(Path::new("/out/a")).unwrap();
        fs.write(Path::new("/out/a/page.html"), "x").unwrap();
        fs.ensure_dir_all(Path::new("/outside")).unwrap();
        fs.remove_dir_all(Path::new("/out")).unwrap();

        assert!(!fs.exists(Path::new("/out")));
        assert!(!fs.exists(Path::new("/out/a/page.html")));
        assert!(fs.exists(Path::new("/outside")));
    }

    #[test]
    fn disk_remove_missing_is_ok() {
        let tmp = TempDir::new().unwrap();
        let mut fs = DiskFs;
        fs.remove_dir_all(&tmp.path().join("absent")).unwrap();
    }

    #[test]
    fn disk_ensure_then_write() {
        let tmp = TempDir::new().unwrap();
        let mut fs = DiskFs;
        let dir = tmp.path().join("a/b/c");
        fs.ensure_dir_all(&dir).unwrap();
        fs.ensure_dir_all(&dir).unwrap();
        fs.write(&dir.join("page.html"), "hello").unwrap();
        assert_eq!(std::fs::read_to_string(dir.join("page.html")).unwrap(), "hello");
    }
}

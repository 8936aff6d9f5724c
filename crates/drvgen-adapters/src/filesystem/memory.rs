//! In-memory filesystem adapter for testing.
//!
//! Mirrors the semantics of the local adapter: directory creation is single
//! level, writes need an existing parent, and only empty directories can be
//! removed. Failures can be injected per path.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use drvgen_core::{
    application::{ApplicationError, ports::Filesystem},
    error::DrvgenResult,
};

/// In-memory filesystem for testing.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    fail_on_write: BTreeSet<PathBuf>,
    fail_on_remove: BTreeSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn has_children(&self, path: &Path) -> bool {
        self.directories.iter().any(|d| d.parent() == Some(path))
            || self.files.keys().any(|f| f.parent() == Some(path))
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a directory and all its ancestors as existing.
    pub fn seed_dir(&self, path: impl AsRef<Path>) -> &Self {
        if let Ok(mut inner) = self.inner.write() {
            for ancestor in path.as_ref().ancestors() {
                if !ancestor.as_os_str().is_empty() {
                    inner.directories.insert(ancestor.to_path_buf());
                }
            }
        }
        self
    }

    /// Make every write to `path` fail.
    pub fn fail_on_write(&self, path: impl Into<PathBuf>) -> &Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.fail_on_write.insert(path.into());
        }
        self
    }

    /// Make every removal of `path` fail.
    pub fn fail_on_remove(&self, path: impl Into<PathBuf>) -> &Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.fail_on_remove.insert(path.into());
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// List all directories, sorted.
    pub fn list_dirs(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.directories.iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn create_dir(&self, path: &Path) -> DrvgenResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        if inner.directories.contains(path) || inner.files.contains_key(path) {
            return Err(ApplicationError::filesystem(path, "already exists").into());
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(
                    ApplicationError::filesystem(path, "parent directory does not exist").into(),
                );
            }
        }

        inner.directories.insert(path.to_path_buf());
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> DrvgenResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        if inner.fail_on_write.contains(path) {
            return Err(ApplicationError::filesystem(path, "injected write failure").into());
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(
                    ApplicationError::filesystem(path, "parent directory does not exist").into(),
                );
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> DrvgenResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        if inner.fail_on_remove.contains(path) || inner.files.remove(path).is_none() {
            return Err(ApplicationError::filesystem(path, "cannot remove file").into());
        }
        Ok(())
    }

    fn remove_dir(&self, path: &Path) -> DrvgenResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        if inner.fail_on_remove.contains(path) {
            return Err(ApplicationError::filesystem(path, "injected remove failure").into());
        }
        if inner.has_children(path) {
            return Err(ApplicationError::filesystem(path, "directory not empty").into());
        }
        if !inner.directories.remove(path) {
            return Err(ApplicationError::filesystem(path, "no such directory").into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_dir_creates_ancestors() {
        let fs = MemoryFilesystem::new();
        fs.seed_dir("/a/b/c");
        assert!(fs.exists(Path::new("/a")));
        assert!(fs.exists(Path::new("/a/b/c")));
    }

    #[test]
    fn create_dir_needs_parent_and_rejects_existing() {
        let fs = MemoryFilesystem::new();
        fs.seed_dir("/out");

        assert!(fs.create_dir(Path::new("/out/x/y")).is_err());
        fs.create_dir(Path::new("/out/x")).unwrap();
        assert!(fs.create_dir(Path::new("/out/x")).is_err());
    }

    #[test]
    fn injected_write_failure() {
        let fs = MemoryFilesystem::new();
        fs.seed_dir("/out").fail_on_write("/out/f");
        assert!(fs.write_file(Path::new("/out/f"), "x").is_err());
        assert!(fs.write_file(Path::new("/out/g"), "x").is_ok());
        assert_eq!(fs.list_files(), vec![PathBuf::from("/out/g")]);
    }

    #[test]
    fn remove_dir_refuses_non_empty() {
        let fs = MemoryFilesystem::new();
        fs.seed_dir("/out/d");
        fs.write_file(Path::new("/out/d/f"), "x").unwrap();

        assert!(fs.remove_dir(Path::new("/out/d")).is_err());
        fs.remove_file(Path::new("/out/d/f")).unwrap();
        fs.remove_dir(Path::new("/out/d")).unwrap();
        assert!(!fs.exists(Path::new("/out/d")));
    }
}

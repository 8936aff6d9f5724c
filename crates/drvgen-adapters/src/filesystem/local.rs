//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use drvgen_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{DrvgenError, DrvgenResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir(&self, path: &Path) -> DrvgenResult<()> {
        std::fs::create_dir(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> DrvgenResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn remove_file(&self, path: &Path) -> DrvgenResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }

    fn remove_dir(&self, path: &Path) -> DrvgenResult<()> {
        std::fs::remove_dir(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> DrvgenError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_dir_is_single_level() {
        let tmp = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new();

        let nested = tmp.path().join("a").join("b");
        assert!(fs.create_dir(&nested).is_err());

        let a = tmp.path().join("a");
        fs.create_dir(&a).unwrap();
        fs.create_dir(&nested).unwrap();
        assert!(fs.exists(&nested));
    }

    #[test]
    fn create_dir_refuses_existing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new();
        let err = fs.create_dir(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("create directory"));
    }

    #[test]
    fn remove_dir_only_removes_empty_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new();
        let dir = tmp.path().join("d");
        fs.create_dir(&dir).unwrap();
        fs.write_file(&dir.join("f.txt"), "x").unwrap();

        assert!(fs.remove_dir(&dir).is_err());
        fs.remove_file(&dir.join("f.txt")).unwrap();
        fs.remove_dir(&dir).unwrap();
        assert!(!fs.exists(&dir));
    }
}

//! Record of filesystem entries created during one run.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::application::ports::Filesystem;

/// A directory or file created by the current run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "lowercase")]
pub enum CreatedEntry {
    Directory(PathBuf),
    File(PathBuf),
}

impl CreatedEntry {
    pub fn path(&self) -> &Path {
        match self {
            Self::Directory(p) | Self::File(p) => p,
        }
    }
}

/// Creation-ordered journal of everything the run put on disk.
#[derive(Debug, Default, Clone)]
pub struct CreationJournal {
    entries: Vec<CreatedEntry>,
}

impl CreationJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_dir(&mut self, path: impl Into<PathBuf>) {
        self.entries.push(CreatedEntry::Directory(path.into()));
    }

    pub fn record_file(&mut self, path: impl Into<PathBuf>) {
        self.entries.push(CreatedEntry::File(path.into()));
    }

    pub fn entries(&self) -> &[CreatedEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.entries.iter().map(|e| e.path().to_path_buf()).collect()
    }

    /// Remove every journaled entry in reverse creation order.
    ///
    /// Failures are logged and skipped. Returns the paths that could not be
    /// removed, in creation order.
    pub fn rollback(self, filesystem: &dyn Filesystem) -> Vec<PathBuf> {
        let mut left_behind = Vec::new();

        for entry in self.entries.into_iter().rev() {
            let result = match &entry {
                CreatedEntry::File(path) => filesystem.remove_file(path),
                CreatedEntry::Directory(path) => filesystem.remove_dir(path),
            };
            match result {
                Ok(()) => debug!(path = %entry.path().display(), "Rolled back"),
                Err(e) => {
                    warn!(error = %e, path = %entry.path().display(), "Rollback failed");
                    left_behind.push(entry.path().to_path_buf());
                }
            }
        }

        left_behind.reverse();
        left_behind
    }
}

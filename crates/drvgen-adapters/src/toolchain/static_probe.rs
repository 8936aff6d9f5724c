use std::path::{Path, PathBuf};

use drvgen_core::{application::ports::ToolchainProbe, domain::ToolchainVersion};

/// Probe with fixed answers, for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct StaticProbe {
    path: Option<PathBuf>,
    version: Option<ToolchainVersion>,
}

impl StaticProbe {
    pub fn new(path: impl Into<PathBuf>, version: ToolchainVersion) -> Self {
        Self {
            path: Some(path.into()),
            version: Some(version),
        }
    }

    /// Probe that finds nothing.
    pub fn missing() -> Self {
        Self::default()
    }

    /// Probe that finds the executable but not its version.
    pub fn without_version(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            version: None,
        }
    }
}

impl ToolchainProbe for StaticProbe {
    fn locate_toolchain(&self) -> Option<PathBuf> {
        self.path.clone()
    }

    fn read_version(&self, _path: &Path) -> Option<ToolchainVersion> {
        self.version
    }
}

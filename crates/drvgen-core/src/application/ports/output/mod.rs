//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from the host.
//! The `drvgen-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::automock;

use crate::domain::{Artifact, Template, ToolchainVersion, UniqueIdentifier};
use crate::error::DrvgenResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `drvgen_adapters::filesystem::LocalFilesystem` (production)
/// - `drvgen_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - `create_dir` is single-level: it fails when the directory exists or
///   its parent is missing
/// - `remove_dir` only removes empty directories
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create one directory level.
    fn create_dir(&self, path: &Path) -> DrvgenResult<()>;

    /// Write content to a file, replacing any previous content.
    fn write_file(&self, path: &Path, content: &str) -> DrvgenResult<()>;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> DrvgenResult<()>;

    /// Remove an empty directory.
    fn remove_dir(&self, path: &Path) -> DrvgenResult<()>;
}

/// Port for toolchain discovery.
///
/// Implemented by:
/// - `drvgen_adapters::toolchain::HostProbe` (registry + executable version resource)
/// - `drvgen_adapters::toolchain::StaticProbe` (fixed answers)
///
/// Both lookups are infallible in signature: absence is `None`, and the
/// orchestrator turns `None` into a precondition failure.
#[cfg_attr(test, automock)]
pub trait ToolchainProbe: Send + Sync {
    /// Path to the toolchain entry executable.
    fn locate_toolchain(&self) -> Option<PathBuf>;

    /// Version embedded in the executable at `path`.
    fn read_version(&self, path: &Path) -> Option<ToolchainVersion>;
}

/// Port for identifier allocation.
///
/// A nil identifier means the entropy or clock source is unavailable.
#[cfg_attr(test, automock)]
pub trait IdentifierAllocator: Send + Sync {
    fn new_identifier(&self) -> UniqueIdentifier;
}

/// Port for template retrieval.
///
/// Implemented by:
/// - `drvgen_adapters::template_store::BuiltinTemplateStore` (compiled-in templates)
pub trait TemplateStore: Send + Sync {
    /// The template for one artifact.
    fn get(&self, artifact: Artifact) -> DrvgenResult<Template>;
}

//! Infrastructure adapters for drvgen.
//!
//! This crate implements the ports defined in `drvgen-core::application::ports`.
//! It contains all host access: filesystem, registry, executable version
//! resources, and the entropy source for identifiers.

pub mod builtin_templates;
pub mod filesystem;
pub mod identifier;
pub mod template_store;
pub mod toolchain;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use identifier::{SequenceAllocator, UuidAllocator};
pub use template_store::BuiltinTemplateStore;
pub use toolchain::{HostProbe, ProbeSettings, StaticProbe};

//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `drvgen-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: directory creation, file writes, removal for rollback
//!   - `ToolchainProbe`: toolchain path and version lookup
//!   - `IdentifierAllocator`: fresh 128-bit identifiers
//!   - `TemplateStore`: template retrieval
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{Filesystem, IdentifierAllocator, TemplateStore, ToolchainProbe};

#[cfg(test)]
pub use output::{MockIdentifierAllocator, MockToolchainProbe};

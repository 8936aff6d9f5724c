//! Application layer for drvgen.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ScaffoldService, LayoutPlanner)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    CreatedEntry, CreationJournal, LayoutPlanner, Phase, RollbackPolicy, ScaffoldFailure,
    ScaffoldReport, ScaffoldService,
};

pub use ports::{Filesystem, IdentifierAllocator, TemplateStore, ToolchainProbe};

pub use error::ApplicationError;

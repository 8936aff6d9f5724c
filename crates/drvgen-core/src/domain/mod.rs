//! Core domain layer for drvgen.
//!
//! Pure logic only: names, versions, identifiers, mark tokens, templates and
//! the output layout. Filesystem access, toolchain discovery and identifier
//! entropy are reached through ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No I/O**: no filesystem, registry, or clock access
//! - **Immutable values**: every domain object is Clone + PartialEq
//! - **Validated at construction**: a `ProjectName` or `Template` that exists is valid
pub mod entities;
pub mod error;
pub mod value_objects;

mod validation;

pub use entities::{
    APP_FOLDER, Artifact, Bindings, COMMON_FOLDER, Folder, IdentifierSet, LayoutPlan, Mark,
    ProjectSpec, Template, TemplateSource, ToolchainFacts, substitute,
};

pub use error::DomainError;

pub use value_objects::{ProjectName, ToolchainVersion, UniqueIdentifier};

pub use validation::DomainValidator;

//! drvgen Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the drvgen
//! driver solution generator, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           drvgen-cli (CLI)              │
//! │     (flags, config, logging, output)    │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │    (ScaffoldService, LayoutPlanner)     │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, ToolchainProbe, Allocator, │
//! │            TemplateStore)               │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    drvgen-adapters (Infrastructure)     │
//! │ (LocalFilesystem, HostProbe, UuidAlloc) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (ProjectName, Mark, Template, Layout)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use drvgen_core::prelude::*;
//!
//! let spec = ProjectSpec::new("MyDriver", "C:\\src")?;
//! let service = ScaffoldService::new(probe, allocator, store, filesystem);
//! let report = service.scaffold(&spec)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, Phase, RollbackPolicy, ScaffoldFailure, ScaffoldReport,
        ScaffoldService,
        ports::{Filesystem, IdentifierAllocator, TemplateStore, ToolchainProbe},
    };
    pub use crate::domain::{
        Artifact, Bindings, DomainError, IdentifierSet, LayoutPlan, Mark, ProjectName,
        ProjectSpec, Template, ToolchainFacts, ToolchainVersion, UniqueIdentifier,
    };
    pub use crate::error::{DrvgenError, DrvgenResult, ErrorCategory};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish the one
//! high-level use case: generate a driver solution tree.

pub mod journal;
pub mod layout_planner;
pub mod scaffold_service;

pub use journal::{CreatedEntry, CreationJournal};
pub use layout_planner::LayoutPlanner;
pub use scaffold_service::{
    Phase, RollbackPolicy, ScaffoldFailure, ScaffoldReport, ScaffoldService, render_artifact,
};

pub mod layout;
pub mod project;
pub mod template;

pub use crate::domain::DomainError;
pub use layout::{APP_FOLDER, Artifact, COMMON_FOLDER, Folder, LayoutPlan};
pub use project::{IdentifierSet, ProjectSpec, ToolchainFacts};
pub use template::{Bindings, Mark, Template, TemplateSource, substitute};

//! Built-in templates.
//!
//! The nine template texts live under `templates/` in this crate and are
//! compiled into the binary, so a generated solution never depends on files
//! next to the executable.
//!
//! Each text uses `$TOKEN$` marks; the marks a template accepts come from
//! [`Artifact::marks`].

use drvgen_core::domain::{Artifact, DomainError, Template};

/// Raw template text for `artifact`.
pub const fn source_for(artifact: Artifact) -> &'static str {
    match artifact {
        Artifact::Solution => include_str!("../templates/solution.sln.tmpl"),
        Artifact::DriverProject => include_str!("../templates/driver.vcxproj.tmpl"),
        Artifact::AppProject => include_str!("../templates/app.vcxproj.tmpl"),
        Artifact::DriverFilters => include_str!("../templates/driver.vcxproj.filters.tmpl"),
        Artifact::AppFilters => include_str!("../templates/app.vcxproj.filters.tmpl"),
        Artifact::DriverHeader => include_str!("../templates/driver.h.tmpl"),
        Artifact::DriverSource => include_str!("../templates/driver.cpp.tmpl"),
        Artifact::AppSource => include_str!("../templates/app.cpp.tmpl"),
        Artifact::CommonHeader => include_str!("../templates/common.h.tmpl"),
    }
}

/// The built-in template for one artifact.
pub fn template_for(artifact: Artifact) -> Result<Template, DomainError> {
    Template::new(artifact, source_for(artifact), artifact.marks())
}

/// All nine built-in templates in write order.
pub fn all_templates() -> Result<Vec<Template>, DomainError> {
    Artifact::ALL.into_iter().map(template_for).collect()
}

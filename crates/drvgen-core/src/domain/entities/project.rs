use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{
    entities::layout::Artifact,
    error::DomainError,
    value_objects::{ProjectName, ToolchainVersion, UniqueIdentifier},
};

/// User intent for one run: what to call the solution and where to put it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSpec {
    name: ProjectName,
    output_root: PathBuf,
}

impl ProjectSpec {
    pub fn new(name: impl Into<String>, output_root: impl Into<PathBuf>) -> Result<Self, DomainError> {
        Ok(Self {
            name: ProjectName::parse(name)?,
            output_root: output_root.into(),
        })
    }

    pub fn name(&self) -> &ProjectName {
        &self.name
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }
}

/// Toolchain snapshot taken once per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolchainFacts {
    pub install_path: PathBuf,
    pub version: ToolchainVersion,
}

impl ToolchainFacts {
    pub fn new(install_path: impl Into<PathBuf>, version: ToolchainVersion) -> Self {
        Self {
            install_path: install_path.into(),
            version,
        }
    }
}

/// Identifiers embedded in the generated manifests.
///
/// The three project ids cross-link the solution and project manifests.
/// The two group ids are opaque keys local to each filter manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IdentifierSet {
    pub solution: UniqueIdentifier,
    pub driver_project: UniqueIdentifier,
    pub app_project: UniqueIdentifier,
    pub driver_filters_group: UniqueIdentifier,
    pub app_filters_group: UniqueIdentifier,
}

impl IdentifierSet {
    /// Group identifier bound into the given filter manifest, if any.
    pub fn group_for(&self, artifact: Artifact) -> Option<UniqueIdentifier> {
        match artifact {
            Artifact::DriverFilters => Some(self.driver_filters_group),
            Artifact::AppFilters => Some(self.app_filters_group),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = UniqueIdentifier> {
        [
            self.solution,
            self.driver_project,
            self.app_project,
            self.driver_filters_group,
            self.app_filters_group,
        ]
        .into_iter()
    }

    /// True when no two identifiers in the set are equal.
    pub fn is_distinct(&self) -> bool {
        let ids: Vec<_> = self.iter().collect();
        ids.iter()
            .enumerate()
            .all(|(i, a)| ids[i + 1..].iter().all(|b| a != b))
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn id(n: u128) -> UniqueIdentifier {
        UniqueIdentifier::from_uuid(Uuid::from_u128(n))
    }

    fn set() -> IdentifierSet {
        IdentifierSet {
            solution: id(1),
            driver_project: id(2),
            app_project: id(3),
            driver_filters_group: id(4),
            app_filters_group: id(5),
        }
    }

    #[test]
    fn spec_validates_name() {
        assert!(ProjectSpec::new("Test", "/out").is_ok());
        assert!(ProjectSpec::new("", "/out").is_err());
        assert!(ProjectSpec::new("a/b", "/out").is_err());
    }

    #[test]
    fn group_ids_belong_to_filter_manifests_only() {
        let ids = set();
        assert_eq!(ids.group_for(Artifact::DriverFilters), Some(id(4)));
        assert_eq!(ids.group_for(Artifact::AppFilters), Some(id(5)));
        assert_eq!(ids.group_for(Artifact::Solution), None);
        assert_eq!(ids.group_for(Artifact::DriverProject), None);
    }

    #[test]
    fn distinctness_detects_duplicates() {
        assert!(set().is_distinct());
        let dup = IdentifierSet {
            app_project: id(2),
            ..set()
        };
        assert!(!dup.is_distinct());
    }
}

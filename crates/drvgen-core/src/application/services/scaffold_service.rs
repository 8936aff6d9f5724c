//! Scaffold Service - main application orchestrator.
//!
//! This service drives one generation run through five gated phases:
//! 1. Resolve the toolchain path and version (and load templates)
//! 2. Plan the layout, creating the directory tree
//! 3. Allocate every identifier the manifests need
//! 4. Render and write the solution manifest
//! 5. Render and write the remaining eight artifacts
//!
//! The first failure halts the run. What happens to entries already on disk
//! depends on the configured `RollbackPolicy`.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, IdentifierAllocator, TemplateStore, ToolchainProbe},
        services::{journal::CreationJournal, layout_planner::LayoutPlanner},
    },
    domain::{
        Artifact, Bindings, DomainValidator as validator, IdentifierSet, Mark, ProjectSpec,
        Template, ToolchainFacts, UniqueIdentifier,
    },
    error::{DrvgenError, DrvgenResult},
};

/// Orchestrator phases, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    ResolveEnvironment,
    PlanLayout,
    AllocateIdentifiers,
    WriteSolution,
    WriteArtifacts,
}

impl Phase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ResolveEnvironment => "resolve environment",
            Self::PlanLayout => "plan layout",
            Self::AllocateIdentifiers => "allocate identifiers",
            Self::WriteSolution => "write solution",
            Self::WriteArtifacts => "write artifacts",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do with created entries when a run fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RollbackPolicy {
    /// Leave everything on disk.
    #[default]
    Keep,
    /// Remove created entries in reverse creation order.
    BestEffort,
}

/// A failed run: the phase that failed, why, and what remains on disk.
#[derive(Debug, Clone, Error)]
#[error("Generation failed during {phase}: {error}")]
pub struct ScaffoldFailure {
    pub phase: Phase,
    #[source]
    pub error: DrvgenError,
    pub left_behind: Vec<PathBuf>,
}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldReport {
    pub output_root: PathBuf,
    pub toolchain: ToolchainFacts,
    pub identifiers: IdentifierSet,
    pub directories: Vec<PathBuf>,
    pub files: Vec<PathBuf>,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    probe: Box<dyn ToolchainProbe>,
    allocator: Box<dyn IdentifierAllocator>,
    store: Box<dyn TemplateStore>,
    filesystem: Box<dyn Filesystem>,
    rollback: RollbackPolicy,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use drvgen_core::application::ScaffoldService;
    ///
    /// let service = ScaffoldService::new(
    ///     probe,      // impl ToolchainProbe
    ///     allocator,  // impl IdentifierAllocator
    ///     store,      // impl TemplateStore
    ///     filesystem, // impl Filesystem
    /// );
    /// ```
    pub fn new(
        probe: Box<dyn ToolchainProbe>,
        allocator: Box<dyn IdentifierAllocator>,
        store: Box<dyn TemplateStore>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            probe,
            allocator,
            store,
            filesystem,
            rollback: RollbackPolicy::default(),
        }
    }

    pub fn with_rollback(mut self, policy: RollbackPolicy) -> Self {
        self.rollback = policy;
        self
    }

    pub fn rollback_policy(&self) -> RollbackPolicy {
        self.rollback
    }

    /// Generate the full solution tree for `spec`.
    #[instrument(
        skip_all,
        fields(
            project = %spec.name(),
            output_root = %spec.output_root().display(),
            rollback = ?self.rollback
        )
    )]
    pub fn scaffold(&self, spec: &ProjectSpec) -> Result<ScaffoldReport, ScaffoldFailure> {
        let mut journal = CreationJournal::new();

        // 1. Environment facts
        let (facts, templates) = self
            .resolve_environment()
            .map_err(|e| self.fail(Phase::ResolveEnvironment, e, journal.clone()))?;
        info!(
            path = %facts.install_path.display(),
            version = %facts.version,
            "Toolchain resolved"
        );

        // 2. Layout
        let plan = LayoutPlanner::new(self.filesystem.as_ref())
            .plan(spec, &mut journal)
            .map_err(|e| self.fail(Phase::PlanLayout, e, journal.clone()))?;
        info!(root = %plan.root().display(), "Layout created");

        // 3. Identifiers
        let identifiers = self
            .allocate_identifiers()
            .map_err(|e| self.fail(Phase::AllocateIdentifiers, e, journal.clone()))?;
        info!(
            solution = %identifiers.solution,
            driver = %identifiers.driver_project,
            app = %identifiers.app_project,
            "Identifiers allocated"
        );

        // 4 + 5. Artifacts, solution first
        let mut files = Vec::with_capacity(Artifact::ALL.len());
        for (artifact, path) in plan.files() {
            let phase = match artifact {
                Artifact::Solution => Phase::WriteSolution,
                _ => Phase::WriteArtifacts,
            };

            if let Err(e) =
                self.write_artifact(&templates, artifact, &path, spec, &facts, &identifiers)
            {
                // A failed write may still have created the file.
                if self.filesystem.exists(&path) {
                    journal.record_file(&path);
                }
                return Err(self.fail(phase, e, journal));
            }

            journal.record_file(&path);
            files.push(path);
        }

        info!(files = files.len(), "Generation complete");

        Ok(ScaffoldReport {
            output_root: plan.root().to_path_buf(),
            toolchain: facts,
            identifiers,
            directories: plan.directories().iter().map(|d| d.to_path_buf()).collect(),
            files,
        })
    }

    // -------------------------------------------------------------------------
    // Phases
    // -------------------------------------------------------------------------

    fn resolve_environment(&self) -> DrvgenResult<(ToolchainFacts, BTreeMap<Artifact, Template>)> {
        let install_path = self
            .probe
            .locate_toolchain()
            .ok_or(ApplicationError::ToolchainNotFound)?;

        let version = self.probe.read_version(&install_path).ok_or_else(|| {
            ApplicationError::ToolchainVersionUnreadable {
                path: install_path.clone(),
            }
        })?;

        let mut templates = BTreeMap::new();
        for artifact in Artifact::ALL {
            let template = self.store.get(artifact)?;
            validator::validate_template(&template)?;
            templates.insert(artifact, template);
        }

        Ok((ToolchainFacts::new(install_path, version), templates))
    }

    fn allocate_identifiers(&self) -> DrvgenResult<IdentifierSet> {
        let next = || -> DrvgenResult<UniqueIdentifier> {
            let id = self.allocator.new_identifier();
            if id.is_nil() {
                return Err(ApplicationError::IdentifierUnavailable.into());
            }
            Ok(id)
        };

        let identifiers = IdentifierSet {
            solution: next()?,
            driver_project: next()?,
            app_project: next()?,
            driver_filters_group: next()?,
            app_filters_group: next()?,
        };

        if !identifiers.is_distinct() {
            warn!("Identifier source returned a repeated identifier");
            return Err(ApplicationError::IdentifierUnavailable.into());
        }
        Ok(identifiers)
    }

    fn write_artifact(
        &self,
        templates: &BTreeMap<Artifact, Template>,
        artifact: Artifact,
        path: &Path,
        spec: &ProjectSpec,
        facts: &ToolchainFacts,
        identifiers: &IdentifierSet,
    ) -> DrvgenResult<()> {
        let template = templates
            .get(&artifact)
            .ok_or(ApplicationError::TemplateMissing { artifact })?;

        let rendered = render_artifact(template, spec, facts, identifiers)?;
        self.filesystem.write_file(path, &rendered)?;
        info!(%artifact, path = %path.display(), "Wrote file");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn fail(&self, phase: Phase, error: DrvgenError, journal: CreationJournal) -> ScaffoldFailure {
        warn!(%phase, error = %error, "Generation failed");

        let left_behind = match self.rollback {
            RollbackPolicy::Keep => journal.paths(),
            RollbackPolicy::BestEffort if journal.is_empty() => Vec::new(),
            RollbackPolicy::BestEffort => {
                info!(entries = journal.entries().len(), "Rolling back");
                journal.rollback(self.filesystem.as_ref())
            }
        };

        ScaffoldFailure {
            phase,
            error,
            left_behind,
        }
    }
}

/// Bind exactly the marks `template` accepts.
fn bindings_for(
    template: &Template,
    spec: &ProjectSpec,
    facts: &ToolchainFacts,
    identifiers: &IdentifierSet,
) -> Bindings {
    let mut bindings = Bindings::new();

    for &mark in template.marks() {
        let value = match mark {
            Mark::ToolchainVersion => Some(facts.version.to_string()),
            Mark::ProjectName => Some(spec.name().to_string()),
            Mark::SolutionId => Some(identifiers.solution.to_string()),
            Mark::DriverProjectId => Some(identifiers.driver_project.to_string()),
            Mark::AppProjectId => Some(identifiers.app_project.to_string()),
            Mark::RandomGroupId => identifiers
                .group_for(template.artifact())
                .map(|id| id.to_string()),
        };
        if let Some(value) = value {
            bindings.insert(mark, value);
        }
    }

    bindings
}

/// Render one artifact and check that none of its accepted marks survive.
pub fn render_artifact(
    template: &Template,
    spec: &ProjectSpec,
    facts: &ToolchainFacts,
    identifiers: &IdentifierSet,
) -> DrvgenResult<String> {
    let bindings = bindings_for(template, spec, facts, identifiers);
    validator::validate_bindings(&bindings)?;
    let rendered = template.render(&bindings);
    validator::validate_rendered(template, &rendered)?;
    Ok(rendered)
}

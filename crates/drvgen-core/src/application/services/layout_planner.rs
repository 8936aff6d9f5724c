//! Layout Planner - establishes the output directory tree.

use tracing::{debug, instrument, warn};

use crate::{
    application::{ApplicationError, ports::Filesystem, services::journal::CreationJournal},
    domain::{LayoutPlan, ProjectSpec},
    error::DrvgenResult,
};

/// Creates the planned directories one level at a time.
///
/// Directories are checked and created in order (root, driver, app, common).
/// The first one that already exists aborts planning with a
/// `LayoutConflict`; directories created before it stay on disk and are
/// recorded in the journal.
pub struct LayoutPlanner<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> LayoutPlanner<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    #[instrument(skip_all, fields(project = %spec.name()))]
    pub fn plan(
        &self,
        spec: &ProjectSpec,
        journal: &mut CreationJournal,
    ) -> DrvgenResult<LayoutPlan> {
        let plan = LayoutPlan::compute(spec);

        for dir in plan.directories() {
            if self.filesystem.exists(dir) {
                warn!(path = %dir.display(), "Directory already exists");
                return Err(ApplicationError::LayoutConflict {
                    path: dir.to_path_buf(),
                }
                .into());
            }

            self.filesystem.create_dir(dir)?;
            journal.record_dir(dir);
            debug!(path = %dir.display(), "Created directory");
        }

        Ok(plan)
    }
}

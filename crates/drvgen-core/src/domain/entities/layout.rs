use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::entities::{project::ProjectSpec, template::Mark};

/// Folder holding the user-mode test application.
pub const APP_FOLDER: &str = "MyApp";

/// Folder holding the header shared by driver and application.
pub const COMMON_FOLDER: &str = "Common";

/// One of the nine generated files.
///
/// `Artifact::ALL` is also the write order: the solution first, then the
/// project manifests, their filters, and finally the sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Artifact {
    Solution,
    DriverProject,
    AppProject,
    DriverFilters,
    AppFilters,
    DriverHeader,
    DriverSource,
    AppSource,
    CommonHeader,
}

/// Directory an artifact lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Folder {
    Root,
    Driver,
    App,
    Common,
}

impl Artifact {
    pub const ALL: [Artifact; 9] = [
        Artifact::Solution,
        Artifact::DriverProject,
        Artifact::AppProject,
        Artifact::DriverFilters,
        Artifact::AppFilters,
        Artifact::DriverHeader,
        Artifact::DriverSource,
        Artifact::AppSource,
        Artifact::CommonHeader,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Solution => "solution",
            Self::DriverProject => "driver-project",
            Self::AppProject => "app-project",
            Self::DriverFilters => "driver-project-filters",
            Self::AppFilters => "app-project-filters",
            Self::DriverHeader => "driver-header",
            Self::DriverSource => "driver-source",
            Self::AppSource => "app-source",
            Self::CommonHeader => "common-header",
        }
    }

    /// Marks the template for this artifact accepts.
    pub const fn marks(&self) -> &'static [Mark] {
        match self {
            Self::Solution => &[
                Mark::ToolchainVersion,
                Mark::ProjectName,
                Mark::SolutionId,
                Mark::DriverProjectId,
                Mark::AppProjectId,
            ],
            Self::DriverProject => &[Mark::DriverProjectId, Mark::ProjectName],
            Self::AppProject => &[Mark::AppProjectId],
            Self::DriverFilters => &[Mark::RandomGroupId, Mark::ProjectName],
            Self::AppFilters => &[Mark::RandomGroupId],
            Self::DriverHeader | Self::DriverSource | Self::AppSource | Self::CommonHeader => {
                &[Mark::ProjectName]
            }
        }
    }

    pub const fn folder(&self) -> Folder {
        match self {
            Self::Solution => Folder::Root,
            Self::DriverProject | Self::DriverFilters | Self::DriverHeader | Self::DriverSource => {
                Folder::Driver
            }
            Self::AppProject | Self::AppFilters | Self::AppSource => Folder::App,
            Self::CommonHeader => Folder::Common,
        }
    }

    /// File name under its folder. Driver artifacts are named after the
    /// project; the others use fixed stems.
    pub fn file_name(&self, project_name: &str) -> String {
        match self {
            Self::Solution => format!("{project_name}.sln"),
            Self::DriverProject => format!("{project_name}.vcxproj"),
            Self::DriverFilters => format!("{project_name}.vcxproj.filters"),
            Self::DriverHeader => format!("{project_name}.h"),
            Self::DriverSource => format!("{project_name}.cpp"),
            Self::AppProject => format!("{APP_FOLDER}.vcxproj"),
            Self::AppFilters => format!("{APP_FOLDER}.vcxproj.filters"),
            Self::AppSource => format!("{APP_FOLDER}.cpp"),
            Self::CommonHeader => format!("{COMMON_FOLDER}.h"),
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved filesystem targets for one generation run.
///
/// Pure data: computing a plan touches no filesystem. Creating the
/// directories is the job of the application-layer `LayoutPlanner`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlan {
    project_name: String,
    root: PathBuf,
    driver_dir: PathBuf,
    app_dir: PathBuf,
    common_dir: PathBuf,
}

impl LayoutPlan {
    pub fn compute(spec: &ProjectSpec) -> Self {
        let name = spec.name().as_str();
        let root = spec.output_root().join(name);

        Self {
            project_name: name.to_string(),
            driver_dir: root.join(name),
            app_dir: root.join(APP_FOLDER),
            common_dir: root.join(COMMON_FOLDER),
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directories in creation order: root, driver, app, common.
    pub fn directories(&self) -> [&Path; 4] {
        [
            &self.root,
            &self.driver_dir,
            &self.app_dir,
            &self.common_dir,
        ]
    }

    pub fn folder(&self, folder: Folder) -> &Path {
        match folder {
            Folder::Root => &self.root,
            Folder::Driver => &self.driver_dir,
            Folder::App => &self.app_dir,
            Folder::Common => &self.common_dir,
        }
    }

    pub fn path_of(&self, artifact: Artifact) -> PathBuf {
        self.folder(artifact.folder())
            .join(artifact.file_name(&self.project_name))
    }

    /// Every artifact with its absolute output path, in write order.
    pub fn files(&self) -> impl Iterator<Item = (Artifact, PathBuf)> + '_ {
        Artifact::ALL.into_iter().map(|a| (a, self.path_of(a)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(name: &str) -> LayoutPlan {
        LayoutPlan::compute(&ProjectSpec::new(name, "/out").unwrap())
    }

    #[test]
    fn directories_follow_fixed_layout() {
        let plan = plan("Test");
        let dirs = plan.directories();
        assert_eq!(dirs[0], Path::new("/out/Test"));
        assert_eq!(dirs[1], Path::new("/out/Test/Test"));
        assert_eq!(dirs[2], Path::new("/out/Test/MyApp"));
        assert_eq!(dirs[3], Path::new("/out/Test/Common"));
    }

    #[test]
    fn artifact_paths_use_project_name_for_driver_files() {
        let plan = plan("Test");
        let expect = [
            (Artifact::Solution, "/out/Test/Test.sln"),
            (Artifact::DriverProject, "/out/Test/Test/Test.vcxproj"),
            (Artifact::DriverFilters, "/out/Test/Test/Test.vcxproj.filters"),
            (Artifact::DriverHeader, "/out/Test/Test/Test.h"),
            (Artifact::DriverSource, "/out/Test/Test/Test.cpp"),
            (Artifact::AppProject, "/out/Test/MyApp/MyApp.vcxproj"),
            (Artifact::AppFilters, "/out/Test/MyApp/MyApp.vcxproj.filters"),
            (Artifact::AppSource, "/out/Test/MyApp/MyApp.cpp"),
            (Artifact::CommonHeader, "/out/Test/Common/Common.h"),
        ];
        for (artifact, path) in expect {
            assert_eq!(plan.path_of(artifact), PathBuf::from(path), "{artifact}");
        }
    }

    #[test]
    fn files_lists_all_nine_artifacts_solution_first() {
        let files: Vec<_> = plan("Drv").files().collect();
        assert_eq!(files.len(), 9);
        assert_eq!(files[0].0, Artifact::Solution);
    }

    #[test]
    fn every_artifact_mark_set_is_disjoint() {
        for artifact in Artifact::ALL {
            assert!(Mark::verify_disjoint(artifact.marks()).is_ok(), "{artifact}");
        }
    }

    #[test]
    fn only_solution_accepts_solution_id() {
        for artifact in Artifact::ALL {
            let accepts = artifact.marks().contains(&Mark::SolutionId);
            assert_eq!(accepts, artifact == Artifact::Solution, "{artifact}");
        }
    }
}

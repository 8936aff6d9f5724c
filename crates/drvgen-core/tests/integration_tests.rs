//! Integration tests for drvgen-core's public API.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use drvgen_core::application::ApplicationError;
use drvgen_core::prelude::*;

#[derive(Clone, Default)]
struct Disk {
    dirs: Arc<Mutex<BTreeSet<PathBuf>>>,
    files: Arc<Mutex<BTreeMap<PathBuf, String>>>,
}

impl Filesystem for Disk {
    fn exists(&self, path: &Path) -> bool {
        self.dirs.lock().unwrap().contains(path) || self.files.lock().unwrap().contains_key(path)
    }

    fn create_dir(&self, path: &Path) -> DrvgenResult<()> {
        self.dirs.lock().unwrap().insert(path.to_path_buf());
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> DrvgenResult<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> DrvgenResult<()> {
        self.files.lock().unwrap().remove(path);
        Ok(())
    }

    fn remove_dir(&self, path: &Path) -> DrvgenResult<()> {
        self.dirs.lock().unwrap().remove(path);
        Ok(())
    }
}

struct FixedProbe;

impl ToolchainProbe for FixedProbe {
    fn locate_toolchain(&self) -> Option<PathBuf> {
        Some(PathBuf::from("/opt/tool/tool.exe"))
    }

    fn read_version(&self, _path: &Path) -> Option<ToolchainVersion> {
        Some(ToolchainVersion::from_packed(0x0010_0000_0000_0001))
    }
}

struct Counter(Mutex<u128>);

impl IdentifierAllocator for Counter {
    fn new_identifier(&self) -> UniqueIdentifier {
        let mut n = self.0.lock().unwrap();
        *n += 1;
        UniqueIdentifier::from_uuid(uuid::Uuid::from_u128(*n))
    }
}

struct EchoStore;

impl TemplateStore for EchoStore {
    fn get(&self, artifact: Artifact) -> DrvgenResult<Template> {
        let text: String = artifact
            .marks()
            .iter()
            .map(|m| format!("{}={}\n", artifact, m.token()))
            .collect();
        Ok(Template::new(artifact, text, artifact.marks())?)
    }
}

fn service(disk: &Disk) -> ScaffoldService {
    ScaffoldService::new(
        Box::new(FixedProbe),
        Box::new(Counter(Mutex::new(0))),
        Box::new(EchoStore),
        Box::new(disk.clone()),
    )
}

#[test]
fn full_run_produces_report_and_files() {
    let disk = Disk::default();
    let spec = ProjectSpec::new("Test", "/out").unwrap();

    let report = service(&disk).scaffold(&spec).unwrap();

    assert_eq!(report.toolchain.version.to_string(), "16.0.0.1");
    assert_eq!(report.directories.len(), 4);
    assert_eq!(report.files.len(), 9);
    assert_eq!(disk.files.lock().unwrap().len(), 9);

    let files = disk.files.lock().unwrap();
    let sln = &files[Path::new("/out/Test/Test.sln")];
    assert!(sln.contains("solution=16.0.0.1"));
    assert!(sln.contains("solution=Test"));
}

#[test]
fn report_serializes_to_json() {
    let disk = Disk::default();
    let spec = ProjectSpec::new("Drv", "/out").unwrap();
    let report = service(&disk).scaffold(&spec).unwrap();

    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["toolchain"]["version"], "16.0.0.1");
    assert_eq!(
        json["identifiers"]["solution"],
        "{00000000-0000-0000-0000-000000000001}"
    );
    assert_eq!(json["files"].as_array().unwrap().len(), 9);
}

#[test]
fn conflict_surfaces_as_scaffold_failure() {
    let disk = Disk::default();
    disk.dirs.lock().unwrap().insert(PathBuf::from("/out/Test"));
    let spec = ProjectSpec::new("Test", "/out").unwrap();

    let failure = service(&disk).scaffold(&spec).unwrap_err();

    assert_eq!(failure.phase, Phase::PlanLayout);
    assert_eq!(failure.error.category(), ErrorCategory::Conflict);
    assert!(matches!(
        failure.error,
        DrvgenError::Application(ApplicationError::LayoutConflict { .. })
    ));
    assert!(failure.to_string().contains("plan layout"));
}

#[test]
fn invalid_names_never_reach_the_service() {
    let err = ProjectSpec::new("bad:name", "/out").unwrap_err();
    assert!(matches!(err, DomainError::InvalidProjectName { .. }));
    assert!(!err.suggestions().is_empty());
}

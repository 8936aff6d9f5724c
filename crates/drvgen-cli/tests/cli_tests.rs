//! End-to-end tests for the drvgen binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

use drvgen_adapters::toolchain::pe_version::encode_fixed_file_info;
use drvgen_core::domain::ToolchainVersion;

/// A fake IDE install plus an output directory, isolated from the host.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("out")).unwrap();
        fs::create_dir(dir.path().join("vs")).unwrap();
        fs::create_dir(dir.path().join("xdg")).unwrap();
        Self { dir }
    }

    /// Sandbox whose fake executable carries `version`.
    fn with_version(version: ToolchainVersion) -> Self {
        let sandbox = Self::new();
        let mut bytes = b"MZ\x90\x00 not really a PE image ".to_vec();
        bytes.extend(encode_fixed_file_info(version));
        fs::write(sandbox.exe(), bytes).unwrap();
        sandbox
    }

    fn out(&self) -> PathBuf {
        self.dir.path().join("out")
    }

    fn exe(&self) -> PathBuf {
        self.dir.path().join("vs").join("devenv.exe")
    }

    /// Config file pointing the probe at the fake install.
    fn config(&self, extra: &str) -> PathBuf {
        let path = self.dir.path().join("drvgen.toml");
        let install = self.dir.path().join("vs");
        fs::write(
            &path,
            format!(
                "[toolchain]\n\
                 install_location = '{}'\n\
                 executable_subpath = \"devenv.exe\"\n\
                 {extra}",
                install.display()
            ),
        )
        .unwrap();
        path
    }

    fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = cargo::cargo_bin_cmd!("drvgen");
        cmd.env_remove("RUST_LOG")
            .env_remove("NO_COLOR")
            .env("XDG_CONFIG_HOME", self.dir.path().join("xdg"));
        cmd
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn help_mentions_both_flags() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--name"))
        .stdout(predicate::str::contains("--path"));
}

#[test]
fn missing_path_is_a_usage_error() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["-name", "Test"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--path"));
}

#[test]
fn single_dash_flags_generate_solution() {
    let sandbox = Sandbox::with_version(ToolchainVersion::new(16, 0, 0, 1));
    let config = sandbox.config("");

    sandbox
        .cmd()
        .arg("--config")
        .arg(&config)
        .arg("-name")
        .arg("Test")
        .arg("-path")
        .arg(sandbox.out())
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 9 files"));

    let root = sandbox.out().join("Test");
    let sln = read(&root.join("Test.sln"));
    assert!(sln.contains("VisualStudioVersion = 16.0.0.1"));
    assert!(root.join("Test").join("Test.vcxproj").is_file());
    assert!(root.join("MyApp").join("MyApp.cpp").is_file());
    assert!(root.join("Common").join("Common.h").is_file());
}

#[test]
fn json_output_is_the_generation_report() {
    let sandbox = Sandbox::with_version(ToolchainVersion::new(16, 11, 5, 0));
    let config = sandbox.config("");

    let assert = sandbox
        .cmd()
        .arg("-c")
        .arg(&config)
        .args(["--output-format", "json", "--name", "Drv", "--path"])
        .arg(sandbox.out())
        .assert()
        .success();

    let report: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["toolchain"]["version"], "16.11.5.0");
    assert_eq!(report["files"].as_array().unwrap().len(), 9);

    let solution_id = report["identifiers"]["solution"].as_str().unwrap();
    let sln = read(&sandbox.out().join("Drv").join("Drv.sln"));
    assert!(sln.contains(solution_id));
}

#[test]
fn existing_output_directory_is_refused() {
    let sandbox = Sandbox::with_version(ToolchainVersion::new(16, 0, 0, 1));
    let config = sandbox.config("");
    let existing = sandbox.out().join("Test");
    fs::create_dir(&existing).unwrap();
    fs::write(existing.join("keep.txt"), "mine").unwrap();

    sandbox
        .cmd()
        .arg("--config")
        .arg(&config)
        .args(["--name", "Test", "--path"])
        .arg(sandbox.out())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("plan layout"))
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(read(&existing.join("keep.txt")), "mine");
    assert_eq!(fs::read_dir(&existing).unwrap().count(), 1);
}

#[test]
fn unreadable_version_is_a_precondition_failure() {
    let sandbox = Sandbox::new();
    fs::write(sandbox.exe(), b"no version resource here").unwrap();
    let config = sandbox.config("");

    sandbox
        .cmd()
        .arg("--config")
        .arg(&config)
        .args(["--name", "Test", "--path"])
        .arg(sandbox.out())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("resolve environment"));

    assert!(!sandbox.out().join("Test").exists());
}

#[cfg(not(windows))]
#[test]
fn no_toolchain_is_a_precondition_failure() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args(["--name", "Test", "--path"])
        .arg(sandbox.out())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Visual Studio"));

    assert!(!sandbox.out().join("Test").exists());
}

#[test]
fn invalid_name_is_a_usage_error() {
    let sandbox = Sandbox::with_version(ToolchainVersion::new(16, 0, 0, 1));
    let config = sandbox.config("");

    sandbox
        .cmd()
        .arg("--config")
        .arg(&config)
        .args(["--name", "bad/name", "--path"])
        .arg(sandbox.out())
        .assert()
        .code(2);

    assert_eq!(fs::read_dir(sandbox.out()).unwrap().count(), 0);
}

#[test]
fn missing_config_file_is_a_configuration_error() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .arg("--config")
        .arg(sandbox.dir.path().join("absent.toml"))
        .args(["--name", "Test", "--path"])
        .arg(sandbox.out())
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

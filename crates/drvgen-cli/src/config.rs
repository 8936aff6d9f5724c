//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Config file: `--config <FILE>` (must exist) or the per-user default
//!    location (optional)
//! 3. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};

use drvgen_adapters::toolchain::{DEFAULT_EXECUTABLE_SUBPATH, DEFAULT_PRODUCT_NAME};
use drvgen_adapters::ProbeSettings;
use drvgen_core::prelude::RollbackPolicy;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where to find the IDE.
    pub toolchain: ToolchainConfig,
    /// Behaviour of a generation run.
    pub generation: GenerationConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolchainConfig {
    /// Uninstall-table `DisplayName` to match.
    pub product_name: String,
    /// Executable below the install location.
    pub executable_subpath: String,
    /// Skips the registry lookup when set.
    #[serde(default)]
    pub install_location: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Remove what a failed run created.
    pub rollback_on_failure: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            toolchain: ToolchainConfig {
                product_name: DEFAULT_PRODUCT_NAME.into(),
                executable_subpath: DEFAULT_EXECUTABLE_SUBPATH.into(),
                install_location: None,
            },
            generation: GenerationConfig {
                rollback_on_failure: false,
            },
            output: OutputConfig { no_color: false },
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the TOML file.
    ///
    /// `config_file` is the path passed via `--config`.  An explicit file
    /// must exist; the default location is read only if present.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required)
    }

    fn load_from(path: &Path, required: bool) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let settings = Config::builder()
            .set_default("toolchain.product_name", defaults.toolchain.product_name)?
            .set_default(
                "toolchain.executable_subpath",
                defaults.toolchain.executable_subpath,
            )?
            .set_default(
                "generation.rollback_on_failure",
                defaults.generation.rollback_on_failure,
            )?
            .set_default("output.no_color", defaults.output.no_color)?
            .add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.drvgen.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "drvgen", "drvgen")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".drvgen.toml"))
    }

    /// Settings for the host toolchain probe.
    pub fn probe_settings(&self) -> ProbeSettings {
        ProbeSettings {
            product_name: self.toolchain.product_name.clone(),
            executable_subpath: self.toolchain.executable_subpath.clone(),
            install_location: self.toolchain.install_location.clone(),
        }
    }

    pub fn rollback_policy(&self) -> RollbackPolicy {
        if self.generation.rollback_on_failure {
            RollbackPolicy::BestEffort
        } else {
            RollbackPolicy::Keep
        }
    }
}

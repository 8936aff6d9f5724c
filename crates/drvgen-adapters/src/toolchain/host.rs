//! Toolchain probe backed by the host system.

use std::path::{Path, PathBuf};

use drvgen_core::{application::ports::ToolchainProbe, domain::ToolchainVersion};
use tracing::{debug, instrument};

use super::pe_version;

/// Product the registry lookup matches by default.
pub const DEFAULT_PRODUCT_NAME: &str = "Visual Studio Professional 2019";

/// Executable path below the install location, `\`-separated.
pub const DEFAULT_EXECUTABLE_SUBPATH: &str = r"Common7\IDE\devenv.exe";

/// Settings for [`HostProbe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeSettings {
    /// `DisplayName` to look for in the uninstall table.
    pub product_name: String,
    /// Path of the entry executable relative to the install location.
    pub executable_subpath: String,
    /// Skip the registry and use this install location.
    pub install_location: Option<PathBuf>,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            product_name: DEFAULT_PRODUCT_NAME.into(),
            executable_subpath: DEFAULT_EXECUTABLE_SUBPATH.into(),
            install_location: None,
        }
    }
}

/// Finds the toolchain via the registry (Windows) or a configured install
/// location, then reads the version resource of its executable.
#[derive(Debug, Clone, Default)]
pub struct HostProbe {
    settings: ProbeSettings,
}

impl HostProbe {
    pub fn new(settings: ProbeSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ProbeSettings {
        &self.settings
    }

    fn install_location(&self) -> Option<PathBuf> {
        if let Some(location) = &self.settings.install_location {
            debug!(path = %location.display(), "Using configured install location");
            return Some(location.clone());
        }
        registry_install_location(&self.settings.product_name)
    }
}

impl ToolchainProbe for HostProbe {
    #[instrument(skip(self), fields(product = %self.settings.product_name))]
    fn locate_toolchain(&self) -> Option<PathBuf> {
        let location = self.install_location()?;
        Some(join_subpath(&location, &self.settings.executable_subpath))
    }

    #[instrument(skip(self))]
    fn read_version(&self, path: &Path) -> Option<ToolchainVersion> {
        pe_version::read_file_version(path)
    }
}

#[cfg(windows)]
fn registry_install_location(product_name: &str) -> Option<PathBuf> {
    super::registry::find_install_location(product_name)
}

#[cfg(not(windows))]
fn registry_install_location(product_name: &str) -> Option<PathBuf> {
    debug!(product = product_name, "No installed-software registry on this host");
    None
}

/// Join a sub-path written with either separator onto `base`.
pub fn join_subpath(base: &Path, subpath: &str) -> PathBuf {
    subpath
        .split(['\\', '/'])
        .filter(|part| !part.is_empty())
        .fold(base.to_path_buf(), |path, part| path.join(part))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolchain::pe_version::encode_fixed_file_info;

    #[test]
    fn subpath_is_split_on_both_separators() {
        let joined = join_subpath(Path::new("/vs"), r"Common7\IDE/devenv.exe");
        assert_eq!(
            joined,
            Path::new("/vs").join("Common7").join("IDE").join("devenv.exe")
        );
    }

    #[test]
    fn configured_location_bypasses_registry() {
        let probe = HostProbe::new(ProbeSettings {
            install_location: Some(PathBuf::from("/opt/vs")),
            ..ProbeSettings::default()
        });
        assert_eq!(
            probe.locate_toolchain(),
            Some(join_subpath(Path::new("/opt/vs"), DEFAULT_EXECUTABLE_SUBPATH))
        );
    }

    #[cfg(not(windows))]
    #[test]
    fn nothing_is_found_without_registry_or_override() {
        assert_eq!(HostProbe::default().locate_toolchain(), None);
    }

    #[test]
    fn reads_version_of_located_executable() {
        let tmp = tempfile::tempdir().unwrap();
        let mut image = b"MZ".to_vec();
        image.extend(encode_fixed_file_info(ToolchainVersion::new(16, 0, 0, 1)));
        std::fs::write(tmp.path().join("devenv.exe"), image).unwrap();

        let probe = HostProbe::new(ProbeSettings {
            executable_subpath: "devenv.exe".into(),
            install_location: Some(tmp.path().to_path_buf()),
            ..ProbeSettings::default()
        });

        let path = probe.locate_toolchain().unwrap();
        assert_eq!(
            probe.read_version(&path),
            Some(ToolchainVersion::new(16, 0, 0, 1))
        );
    }
}

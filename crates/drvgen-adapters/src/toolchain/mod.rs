//! Toolchain discovery adapters.

mod host;
pub mod pe_version;
#[cfg(windows)]
mod registry;
mod static_probe;

pub use host::{
    DEFAULT_EXECUTABLE_SUBPATH, DEFAULT_PRODUCT_NAME, HostProbe, ProbeSettings, join_subpath,
};
pub use static_probe::StaticProbe;

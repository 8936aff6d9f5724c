//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! and help text.  No business logic lives here.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Args, Parser};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

/// Long flags that are also accepted with a single dash (`-name`, `-path`).
const SINGLE_DASH_LONG_FLAGS: &[&str] = &["name", "path", "config", "verbose", "quiet"];

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = "drvgen",
    bin_name = "drvgen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generate a Visual Studio kernel driver solution",
    long_about = "drvgen creates a ready-to-build Visual Studio solution with a \
                  kernel driver project, a user-mode test application and a \
                  shared header. The installed Visual Studio version is detected \
                  and written into the solution file.",
    after_help = "EXAMPLES:\n\
        \x20 drvgen -name MyDriver -path C:\\src\n\
        \x20 drvgen --name MyDriver --path . -v\n\
        \x20 drvgen -name MyDriver -path . --output-format json",
)]
pub struct Cli {
    /// Ambient flags.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// What to generate and where.
    #[command(flatten)]
    pub generate: GenerateArgs,
}

impl Cli {
    /// Parse `args` after normalising single-dash long flags.
    pub fn try_parse_normalized<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for a generation run.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Solution and driver name.
    #[arg(
        long = "name",
        value_name = "NAME",
        help = "Solution / driver name (also used for folder and file names)"
    )]
    pub name: String,

    /// Output base directory. The solution is created in `<PATH>/<NAME>`.
    #[arg(
        long = "path",
        value_name = "PATH",
        help = "Output base directory (must exist)"
    )]
    pub path: PathBuf,
}

/// Rewrite `-name X` / `-name=X` style flags to their `--` form.
///
/// Only the flags in [`SINGLE_DASH_LONG_FLAGS`] are touched; short flags
/// such as `-v`, `-vv` or `-q` and everything after `--` pass through.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;

    args.into_iter()
        .map(Into::into)
        .enumerate()
        .map(|(index, arg)| {
            if index == 0 || passthrough {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                passthrough = true;
                return arg;
            }

            let Some(flag) = text.strip_prefix('-').filter(|rest| !rest.starts_with('-')) else {
                return arg;
            };
            let key = flag.split_once('=').map_or(flag, |(key, _)| key);
            if SINGLE_DASH_LONG_FLAGS.contains(&key) {
                OsString::from(format!("-{text}"))
            } else {
                arg
            }
        })
        .collect()
}

// ── tests ─────────────────────────────────────────────────────────────────────

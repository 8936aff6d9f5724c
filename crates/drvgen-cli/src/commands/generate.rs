//! Implementation of a `drvgen` generation run.
//!
//! Responsibility: translate CLI arguments into a `ProjectSpec`, wire the
//! host adapters into the core scaffold service, and display results. No
//! business logic lives here.

use tracing::{info, instrument};

use drvgen_adapters::{BuiltinTemplateStore, HostProbe, LocalFilesystem, UuidAllocator};
use drvgen_core::prelude::{DrvgenError, ProjectSpec, ScaffoldService};

use crate::{
    cli::GenerateArgs,
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

/// Execute one generation run.
///
/// 1. Validate the name and build the project spec
/// 2. Wire host adapters (registry probe, v4 identifiers, built-in templates,
///    local filesystem)
/// 3. Run the scaffold service
/// 4. Print the report
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let spec = ProjectSpec::new(&args.name, &args.path)
        .map_err(DrvgenError::from)
        .with_cli_context(|| "validating arguments")?;

    let service = build_service(&config)?;

    output.header(&format!("Generating '{}'...", spec.name()))?;
    info!(
        path = %args.path.display(),
        rollback = ?config.rollback_policy(),
        "Generation started"
    );

    let report = service.scaffold(&spec)?;

    info!(files = report.files.len(), "Generation completed");

    output
        .report(&report)
        .with_cli_context(|| "printing the generation report")
}

fn build_service(config: &AppConfig) -> CliResult<ScaffoldService> {
    let store = BuiltinTemplateStore::new().with_cli_context(|| "loading templates")?;

    Ok(ScaffoldService::new(
        Box::new(HostProbe::new(config.probe_settings())),
        Box::new(UuidAllocator::new()),
        Box::new(store),
        Box::new(LocalFilesystem::new()),
    )
    .with_rollback(config.rollback_policy()))
}

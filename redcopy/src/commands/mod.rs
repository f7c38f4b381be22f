// redcopy/src/commands/mod.rs

pub mod plan;
pub mod run;

use std::sync::Arc;

use anyhow::Context;
use miette::Diagnostic;
use redcopy_core::application::CredentialResolver;
use redcopy_core::infrastructure::adapters::RedshiftConnector;
use redcopy_core::infrastructure::config::{ConnectionRegistry, load_transfer_spec};
use redcopy_core::{TransferError, TransferOrchestrator};

use crate::cli::TaskArgs;

/// Loads task + connections and resolves credentials.
///
/// Config errors come back as `anyhow` (exit through `main`), transfer
/// errors are returned as-is so the caller can report them.
pub(crate) async fn build_orchestrator(
    args: &TaskArgs,
) -> anyhow::Result<Result<TransferOrchestrator, TransferError>> {
    let spec = load_transfer_spec(&args.task)
        .with_context(|| format!("Failed to load transfer task from {:?}", args.task))?;
    let spec = args.apply_overrides(spec);

    let registry = Arc::new(ConnectionRegistry::load(&args.config_dir).with_context(|| {
        format!("Failed to load connections from {:?}", args.config_dir)
    })?);
    let resolver = CredentialResolver::from_registry(Arc::clone(&registry));
    let connector = Arc::new(RedshiftConnector::new(registry));

    Ok(TransferOrchestrator::new(spec, &resolver, connector).await)
}

pub(crate) fn report_failure(err: &TransferError) -> ! {
    eprintln!("\n💥 TRANSFER FAILED: {}", err);
    if let Some(help) = err.help() {
        eprintln!("👉 {}", help);
    }
    std::process::exit(1);
}

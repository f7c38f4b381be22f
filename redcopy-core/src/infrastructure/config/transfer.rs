// redcopy-core/src/infrastructure/config/transfer.rs

use std::fs;
use std::path::Path;
use tracing::{info, instrument};

use crate::domain::transfer::TransferSpec;
use crate::error::TransferError;
use crate::infrastructure::error::InfrastructureError;

/// Reads a task file into a validated [`TransferSpec`].
///
/// An unknown `data_source` fails here, before any credential lookup.
#[instrument]
pub fn load_transfer_spec(path: &Path) -> Result<TransferSpec, TransferError> {
    if !path.exists() {
        return Err(InfrastructureError::ConfigNotFound(path.display().to_string()).into());
    }
    let content = fs::read_to_string(path)?;
    let spec = parse_transfer_spec(&content)?;
    info!(
        target_table = %spec.target(),
        source = %spec.data_source,
        operation = %spec.operation,
        "Transfer task loaded"
    );
    Ok(spec)
}

pub fn parse_transfer_spec(content: &str) -> Result<TransferSpec, TransferError> {
    let spec: TransferSpec = serde_yaml::from_str(content).map_err(InfrastructureError::YamlError)?;
    Ok(spec.validated()?)
}

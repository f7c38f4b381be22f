// redcopy-core/src/application/transfer.rs

use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::application::engine::execute_statement;
use crate::application::resolver::CredentialResolver;
use crate::domain::compiler::LoadStatement;
use crate::domain::error::DomainError;
use crate::domain::transfer::{DataSourceKind, OperationMode, ResolvedCredentials, TransferSpec};
use crate::error::TransferError;
use crate::ports::warehouse::WarehouseConnector;

/// One bulk load, wired end to end.
///
/// Credentials are resolved once in [`TransferOrchestrator::new`]; every
/// [`run`](Self::run) reuses them and renders a fresh statement.
pub struct TransferOrchestrator {
    spec: TransferSpec,
    credentials: ResolvedCredentials,
    connector: Arc<dyn WarehouseConnector>,
}

impl TransferOrchestrator {
    #[instrument(
        skip_all,
        fields(target_table = %spec.target(), source = %spec.data_source)
    )]
    pub async fn new(
        spec: TransferSpec,
        resolver: &CredentialResolver,
        connector: Arc<dyn WarehouseConnector>,
    ) -> Result<Self, TransferError> {
        let spec = spec.validated()?;
        let credentials = resolver
            .resolve(spec.data_source, &spec.aws_conn_id, &spec.verify)
            .await?;

        Ok(Self {
            spec,
            credentials,
            connector,
        })
    }

    pub fn spec(&self) -> &TransferSpec {
        &self.spec
    }

    /// Validates the mode and renders the statement without touching the warehouse.
    pub fn plan(&self) -> Result<LoadStatement, TransferError> {
        match self.operation()? {
            OperationMode::Copy => Ok(LoadStatement::build(&self.spec, &self.credentials)),
            mode @ OperationMode::Upsert => Err(not_implemented(mode)),
        }
    }

    #[instrument(skip(self), fields(target_table = %self.spec.target()))]
    pub async fn run(&self) -> Result<(), TransferError> {
        match self.operation()? {
            OperationMode::Copy => self.copy_data().await,
            mode @ OperationMode::Upsert => {
                warn!(operation = %mode, "Operation is recognized but has no execution path");
                Err(not_implemented(mode))
            }
        }
    }

    fn operation(&self) -> Result<OperationMode, DomainError> {
        OperationMode::validate(&self.spec.operation)
    }

    async fn copy_data(&self) -> Result<(), TransferError> {
        let warehouse = self.connector.connect(&self.spec.warehouse_conn_id).await?;
        let statement = LoadStatement::build(&self.spec, &self.credentials);

        info!("Executing COPY command...");
        execute_statement(warehouse.as_ref(), &statement, self.spec.autocommit).await?;
        info!("COPY command complete...");
        Ok(())
    }

    pub fn summary(&self) -> TransferSummary {
        TransferSummary::from(&self.spec)
    }
}

fn not_implemented(mode: OperationMode) -> TransferError {
    DomainError::OperationNotImplemented {
        mode: mode.to_string(),
    }
    .into()
}

/// Secret-free view of a transfer, for `plan` output.
#[derive(Debug, Clone, Serialize)]
pub struct TransferSummary {
    pub target: String,
    pub source: String,
    pub data_source: DataSourceKind,
    pub warehouse_conn_id: String,
    pub aws_conn_id: String,
    pub verify: String,
    pub operation: String,
    pub autocommit: bool,
    pub copy_options: Vec<String>,
}

impl From<&TransferSpec> for TransferSummary {
    fn from(spec: &TransferSpec) -> Self {
        Self {
            target: spec.target(),
            source: format!(
                "{}://{}/{}",
                spec.data_source,
                spec.source_location.as_deref().unwrap_or_default(),
                spec.source_key.as_deref().unwrap_or_default()
            ),
            data_source: spec.data_source,
            warehouse_conn_id: spec.warehouse_conn_id.clone(),
            aws_conn_id: spec.aws_conn_id.clone(),
            verify: spec.verify.to_string(),
            operation: spec.operation.clone(),
            autocommit: spec.autocommit,
            copy_options: spec.copy_options.clone(),
        }
    }
}

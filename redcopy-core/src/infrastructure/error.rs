// redcopy-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

/// Raw failure reported by a warehouse driver.
#[derive(Error, Debug, Diagnostic)]
pub enum DatabaseError {
    #[error("Redshift Engine Error: {0}")]
    #[diagnostic(
        code(redcopy::infra::database::postgres),
        help("The warehouse rejected the statement (syntax, permissions or credentials).")
    )]
    Postgres(#[from] tokio_postgres::Error),

    /// Failure from a [`Warehouse`](crate::ports::warehouse::Warehouse)
    /// adapter that is not backed by tokio-postgres.
    #[error("Warehouse Driver Error: {0}")]
    #[diagnostic(code(redcopy::infra::database::driver))]
    Driver(String),
}

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- WAREHOUSE ---
    #[error("COPY into {target} from {source_kind} failed: {source}")]
    #[diagnostic(
        code(redcopy::infra::warehouse_execution),
        help("The load was not retried. Fix the cause and rerun the task.")
    )]
    WarehouseExecution {
        target: String,
        source_kind: String,
        #[source]
        source: DatabaseError,
    },

    #[error("Could not connect to warehouse '{connection_id}': {reason}")]
    #[diagnostic(code(redcopy::infra::warehouse_connection))]
    WarehouseConnection {
        connection_id: String,
        reason: String,
    },

    // --- CREDENTIALS ---
    #[error("Could not resolve {source_kind} credentials from connection '{connection_id}': {reason}")]
    #[diagnostic(
        code(redcopy::infra::credentials),
        help("Check connections.yml or the default AWS credential chain (AWS_* variables, ~/.aws files, instance role).")
    )]
    CredentialResolution {
        connection_id: String,
        source_kind: String,
        reason: String,
    },

    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(redcopy::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(redcopy::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(redcopy::infra::config))]
    ConfigError(String),

    #[error("Configuration not found at '{0}'")]
    #[diagnostic(code(redcopy::infra::config_missing))]
    ConfigNotFound(String),
}

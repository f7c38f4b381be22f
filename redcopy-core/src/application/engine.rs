// redcopy-core/src/application/engine.rs

use std::time::Instant;
use tracing::{debug, error, instrument};

use crate::domain::compiler::LoadStatement;
use crate::error::TransferError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::warehouse::Warehouse;

/// Submits the statement once, with timing.
///
/// Warehouse failures come back as `WarehouseExecution` around the driver
/// error. Nothing is retried. Logs carry the target, source kind and option
/// count, never the statement text.
#[instrument(
    skip(warehouse, statement),
    fields(target_table = %statement.target(), source = %statement.source_kind())
)]
pub async fn execute_statement(
    warehouse: &dyn Warehouse,
    statement: &LoadStatement,
    autocommit: bool,
) -> Result<(), TransferError> {
    let start = Instant::now();
    debug!(
        options = statement.option_count(),
        bytes = statement.as_sql().len(),
        "⚡ Executing COPY statement"
    );

    let result = warehouse.execute(statement.as_sql(), autocommit).await;
    let duration = start.elapsed();

    match result {
        Ok(()) => {
            debug!("✅ Statement finished in {:.2?}", duration);
            Ok(())
        }
        Err(e) => {
            error!("❌ Statement failed after {:.2?}: {}", duration, e);
            Err(InfrastructureError::WarehouseExecution {
                target: statement.target().to_string(),
                source_kind: statement.source_kind().to_string(),
                source: e,
            }
            .into())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::transfer::{ResolvedCredentials, Secret, TransferSpec};
    use crate::infrastructure::error::DatabaseError;
    use async_trait::async_trait;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<(String, bool)>>,
    }

    #[async_trait]
    impl Warehouse for Recorder {
        async fn execute(&self, sql: &str, autocommit: bool) -> Result<(), DatabaseError> {
            self.calls.lock().unwrap().push((sql.to_string(), autocommit));
            Ok(())
        }
    }

    struct Rejecting;

    #[async_trait]
    impl Warehouse for Rejecting {
        async fn execute(&self, _sql: &str, _autocommit: bool) -> Result<(), DatabaseError> {
            Err(DatabaseError::Driver("permission denied for relation events".into()))
        }
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn statement() -> anyhow::Result<LoadStatement> {
        let spec = TransferSpec::builder("public", "events")
            .source("bucket", "key.csv")
            .copy_options(["CSV"])
            .build()?;
        let creds = ResolvedCredentials::new("AKIA", Secret::new("TOPSECRET"));
        Ok(LoadStatement::build(&spec, &creds))
    }

    #[tokio::test]
    async fn test_submits_raw_sql_with_commit_mode() -> anyhow::Result<()> {
        let warehouse = Recorder::default();
        let statement = statement()?;

        execute_statement(&warehouse, &statement, true).await?;

        let calls = warehouse.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, statement.as_sql());
        assert!(calls[0].1);
        Ok(())
    }

    #[tokio::test]
    async fn test_rejection_is_wrapped_without_secret() -> anyhow::Result<()> {
        let err = execute_statement(&Rejecting, &statement()?, false)
            .await
            .unwrap_err();

        match &err {
            TransferError::Infrastructure(InfrastructureError::WarehouseExecution {
                target,
                source_kind,
                source: DatabaseError::Driver(msg),
            }) => {
                assert_eq!(target, "public.events");
                assert_eq!(source_kind, "s3");
                assert!(msg.contains("permission denied"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!format!("{err} {err:?}").contains("TOPSECRET"));
        Ok(())
    }

    #[tokio::test]
    async fn test_logs_carry_structure_not_statement_text() -> anyhow::Result<()> {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        execute_statement(&Recorder::default(), &statement()?, false).await?;

        let logs = String::from_utf8(buffer.0.lock().unwrap().clone())?;
        assert!(logs.contains("Executing COPY statement"));
        assert!(logs.contains("options=1"));
        assert!(logs.contains("public.events"));
        assert!(!logs.contains("AKIA"));
        assert!(!logs.contains("TOPSECRET"));
        assert!(!logs.contains("FROM '"));
        Ok(())
    }
}

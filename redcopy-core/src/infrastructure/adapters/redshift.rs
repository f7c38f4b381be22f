// redcopy-core/src/infrastructure/adapters/redshift.rs

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_postgres::{Client, NoTls};
use tracing::{error, info, warn};

use crate::error::TransferError;
use crate::infrastructure::config::{ConnectionRegistry, WarehouseConnection};
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use crate::ports::warehouse::{Warehouse, WarehouseConnector};

/// Redshift speaks the PostgreSQL wire protocol, so `tokio-postgres` is the driver.
pub struct RedshiftWarehouse {
    client: Mutex<Client>,
}

impl RedshiftWarehouse {
    pub fn new(client: Client) -> Self {
        Self {
            client: Mutex::new(client),
        }
    }
}

#[async_trait]
impl Warehouse for RedshiftWarehouse {
    async fn execute(&self, sql: &str, autocommit: bool) -> Result<(), DatabaseError> {
        let mut client = self.client.lock().await;

        if autocommit {
            client.batch_execute(sql).await?;
            return Ok(());
        }

        // Dropping the transaction on error rolls it back.
        let tx = client.transaction().await?;
        tx.batch_execute(sql).await?;
        tx.commit().await?;
        Ok(())
    }
}

/// Opens [`RedshiftWarehouse`] sessions from `redshift` profiles.
pub struct RedshiftConnector {
    registry: Arc<ConnectionRegistry>,
}

impl RedshiftConnector {
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }
}

fn pg_config(profile: &WarehouseConnection) -> tokio_postgres::Config {
    let mut config = tokio_postgres::Config::new();
    config
        .host(&profile.host)
        .port(profile.port)
        .dbname(&profile.database)
        .user(&profile.user)
        .application_name("redcopy");
    if let Some(password) = &profile.password {
        config.password(password.expose());
    }
    if let Some(secs) = profile.connect_timeout_secs {
        config.connect_timeout(Duration::from_secs(secs));
    }
    config
}

#[async_trait]
impl WarehouseConnector for RedshiftConnector {
    async fn connect(&self, connection_id: &str) -> Result<Box<dyn Warehouse>, TransferError> {
        let profile = self.registry.warehouse(connection_id)?;

        if let Some(mode) = profile.sslmode.as_deref().filter(|m| *m != "disable") {
            warn!(
                connection_id,
                sslmode = mode,
                "TLS not yet supported for warehouse connections; falling back to NoTls"
            );
        }

        info!(connection_id, host = %profile.host, port = profile.port, "Connecting to warehouse");
        let (client, connection) = pg_config(profile).connect(NoTls).await.map_err(|e| {
            InfrastructureError::WarehouseConnection {
                connection_id: connection_id.to_string(),
                reason: e.to_string(),
            }
        })?;

        let owned_id = connection_id.to_string();
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!(connection_id = %owned_id, error = %e, "Warehouse connection error");
            }
        });

        Ok(Box::new(RedshiftWarehouse::new(client)))
    }
}

// redcopy-core/src/ports/warehouse.rs

use crate::error::TransferError;
use crate::infrastructure::error::DatabaseError;
use async_trait::async_trait;

/// An open warehouse session.
#[async_trait]
pub trait Warehouse: Send + Sync {
    /// Runs `sql` once.
    ///
    /// With `autocommit` the driver commits as part of the call. Without it
    /// the statement runs inside the session's transaction and committing is
    /// up to the implementation, never to the caller of this trait.
    ///
    /// Returns the raw driver error; context is attached by the engine.
    async fn execute(&self, sql: &str, autocommit: bool) -> Result<(), DatabaseError>;
}

/// Opens warehouse sessions from a named connection.
#[async_trait]
pub trait WarehouseConnector: Send + Sync {
    async fn connect(&self, connection_id: &str) -> Result<Box<dyn Warehouse>, TransferError>;
}

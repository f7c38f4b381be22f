// redcopy-core/src/ports/mod.rs

pub mod credentials;
pub mod warehouse;

pub use credentials::CredentialProvider;
pub use warehouse::{Warehouse, WarehouseConnector};

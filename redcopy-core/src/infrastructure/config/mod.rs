pub mod connection;
pub mod transfer;

pub use connection::{AwsConnection, ConnectionProfile, ConnectionRegistry, WarehouseConnection};
pub use transfer::{load_transfer_spec, parse_transfer_spec};

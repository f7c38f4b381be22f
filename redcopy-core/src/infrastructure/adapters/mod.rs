pub mod aws;
pub mod redshift;

pub use aws::AwsCredentialProvider;
pub use redshift::{RedshiftConnector, RedshiftWarehouse};

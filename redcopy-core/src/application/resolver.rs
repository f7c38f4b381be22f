// redcopy-core/src/application/resolver.rs

use std::sync::Arc;
use tracing::{info, instrument};

use crate::domain::transfer::{DataSourceKind, ResolvedCredentials, VerifyOption};
use crate::error::TransferError;
use crate::infrastructure::adapters::aws::AwsCredentialProvider;
use crate::infrastructure::config::ConnectionRegistry;
use crate::ports::credentials::CredentialProvider;

/// Picks the credential provider matching the data source.
pub struct CredentialResolver {
    s3: Arc<dyn CredentialProvider>,
    dynamodb: Arc<dyn CredentialProvider>,
}

impl CredentialResolver {
    pub fn new(s3: Arc<dyn CredentialProvider>, dynamodb: Arc<dyn CredentialProvider>) -> Self {
        Self { s3, dynamodb }
    }

    pub fn from_registry(registry: Arc<ConnectionRegistry>) -> Self {
        Self::new(
            Arc::new(AwsCredentialProvider::s3(Arc::clone(&registry))),
            Arc::new(AwsCredentialProvider::dynamodb(registry)),
        )
    }

    #[instrument(skip(self, kind, verify), fields(source = %kind))]
    pub async fn resolve(
        &self,
        kind: DataSourceKind,
        connection_id: &str,
        verify: &VerifyOption,
    ) -> Result<ResolvedCredentials, TransferError> {
        let provider = match kind {
            DataSourceKind::S3 => &self.s3,
            DataSourceKind::DynamoDb => &self.dynamodb,
        };
        let credentials = provider.get_credentials(connection_id, verify).await?;
        info!("🔑 Credentials resolved");
        Ok(credentials)
    }
}

// redcopy-core/src/infrastructure/adapters/aws.rs

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use std::error::Error as _;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::transfer::{DataSourceKind, ResolvedCredentials, Secret, VerifyOption};
use crate::error::TransferError;
use crate::infrastructure::config::{AwsConnection, ConnectionRegistry};
use crate::infrastructure::error::InfrastructureError;
use crate::ports::credentials::CredentialProvider;

/// Static AWS credentials for one service (S3 or DynamoDB).
///
/// Resolution order:
/// 1. the `aws` profile named by the connection id in `connections.yml`,
///    when it sets both keys
/// 2. the default AWS credential chain (environment, shared config files,
///    SSO, web identity, container and instance roles)
pub struct AwsCredentialProvider {
    registry: Arc<ConnectionRegistry>,
    service: DataSourceKind,
    chain: Option<SharedCredentialsProvider>,
}

impl AwsCredentialProvider {
    pub fn s3(registry: Arc<ConnectionRegistry>) -> Self {
        Self::for_service(registry, DataSourceKind::S3)
    }

    pub fn dynamodb(registry: Arc<ConnectionRegistry>) -> Self {
        Self::for_service(registry, DataSourceKind::DynamoDb)
    }

    fn for_service(registry: Arc<ConnectionRegistry>, service: DataSourceKind) -> Self {
        Self {
            registry,
            service,
            chain: None,
        }
    }

    /// Uses `provider` instead of the default chain when the profile has no keys.
    pub fn with_chain(mut self, provider: impl ProvideCredentials + 'static) -> Self {
        self.chain = Some(SharedCredentialsProvider::new(provider));
        self
    }

    fn failure(&self, connection_id: &str, reason: impl Into<String>) -> TransferError {
        InfrastructureError::CredentialResolution {
            connection_id: connection_id.to_string(),
            source_kind: self.service.to_string(),
            reason: reason.into(),
        }
        .into()
    }

    fn check_verify(&self, connection_id: &str, verify: &VerifyOption) -> Result<(), TransferError> {
        match verify {
            VerifyOption::Enabled => Ok(()),
            VerifyOption::Disabled => {
                warn!(
                    connection_id,
                    service = %self.service,
                    "SSL certificate verification is disabled for this connection"
                );
                Ok(())
            }
            VerifyOption::CaBundle(path) if path.is_file() => Ok(()),
            VerifyOption::CaBundle(path) => Err(self.failure(
                connection_id,
                format!("CA bundle {} does not exist", path.display()),
            )),
        }
    }

    async fn default_chain(&self, region: Option<&str>) -> Option<SharedCredentialsProvider> {
        if let Some(chain) = &self.chain {
            return Some(chain.clone());
        }
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region.to_string()));
        }
        loader.load().await.credentials_provider()
    }

    async fn from_chain(
        &self,
        connection_id: &str,
        profile: Option<&AwsConnection>,
    ) -> Result<ResolvedCredentials, TransferError> {
        let region = profile.and_then(|p| p.region.as_deref());
        let chain = self
            .default_chain(region)
            .await
            .ok_or_else(|| self.failure(connection_id, "no default AWS credential chain available"))?;

        let credentials = chain.provide_credentials().await.map_err(|e| {
            let reason = match e.source() {
                Some(cause) => format!("default AWS credential chain: {e}: {cause}"),
                None => format!("default AWS credential chain: {e}"),
            };
            self.failure(connection_id, reason)
        })?;

        if credentials.session_token().is_some() {
            warn!(
                connection_id,
                service = %self.service,
                "Temporary credentials resolved; the COPY credentials string carries no session token"
            );
        }

        Ok(ResolvedCredentials::new(
            credentials.access_key_id().to_string(),
            Secret::new(credentials.secret_access_key().to_string()),
        ))
    }
}

#[async_trait]
impl CredentialProvider for AwsCredentialProvider {
    async fn get_credentials(
        &self,
        connection_id: &str,
        verify: &VerifyOption,
    ) -> Result<ResolvedCredentials, TransferError> {
        self.check_verify(connection_id, verify)?;

        let profile = self
            .registry
            .aws(connection_id)
            .map_err(|e| self.failure(connection_id, e.to_string()))?;

        let explicit = profile.map(|p| (&p.aws_access_key_id, &p.aws_secret_access_key));
        let credentials = match explicit {
            Some((Some(access_key), Some(secret_key))) => {
                debug!(connection_id, "Using explicit AWS credentials");
                ResolvedCredentials::new(access_key.clone(), secret_key.clone())
            }
            Some((Some(_), None)) | Some((None, Some(_))) => {
                return Err(self.failure(
                    connection_id,
                    "profile sets only one of aws_access_key_id / aws_secret_access_key",
                ));
            }
            _ => {
                debug!(connection_id, "Using default AWS credential chain");
                self.from_chain(connection_id, profile).await?
            }
        };

        debug!(
            connection_id,
            service = %self.service,
            region = profile.and_then(|p| p.region.as_deref()).unwrap_or("-"),
            "Credentials resolved"
        );
        Ok(credentials)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use aws_credential_types::Credentials;
    use aws_credential_types::provider::error::CredentialsError;
    use aws_credential_types::provider::future;
    use std::path::PathBuf;

    fn registry() -> Result<Arc<ConnectionRegistry>> {
        Ok(Arc::new(ConnectionRegistry::from_yaml_str(
            r#"
aws_default:
  type: aws
  aws_access_key_id: AKIAPROFILE
  aws_secret_access_key: profile-secret
partial:
  type: aws
  aws_access_key_id: AKIAPARTIAL
region_only:
  type: aws
  region: eu-west-1
warehouse:
  type: redshift
  host: localhost
  database: dev
  user: admin
"#,
        )?))
    }

    fn chain_credentials() -> Credentials {
        Credentials::new("AKIACHAIN", "chain-secret", None, None, "redcopy-test")
    }

    #[derive(Debug)]
    struct EmptyChain;

    impl ProvideCredentials for EmptyChain {
        fn provide_credentials<'a>(&'a self) -> future::ProvideCredentials<'a>
        where
            Self: 'a,
        {
            future::ProvideCredentials::ready(Err(CredentialsError::not_loaded(
                "no providers in chain provided credentials",
            )))
        }
    }

    #[tokio::test]
    async fn test_profile_credentials() -> Result<()> {
        let provider = AwsCredentialProvider::s3(registry()?).with_chain(EmptyChain);
        let creds = provider
            .get_credentials("aws_default", &VerifyOption::Enabled)
            .await?;
        assert_eq!(creds.access_key(), "AKIAPROFILE");
        assert_eq!(creds.secret_key().expose(), "profile-secret");
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_connection_uses_default_chain() -> Result<()> {
        let provider = AwsCredentialProvider::dynamodb(registry()?).with_chain(chain_credentials());

        let unknown = provider
            .get_credentials("not_in_registry", &VerifyOption::Enabled)
            .await?;
        assert_eq!(unknown.access_key(), "AKIACHAIN");
        assert_eq!(unknown.secret_key().expose(), "chain-secret");

        let region_only = provider
            .get_credentials("region_only", &VerifyOption::Enabled)
            .await?;
        assert_eq!(region_only.access_key(), "AKIACHAIN");
        Ok(())
    }

    #[tokio::test]
    async fn test_half_configured_profile_fails() -> Result<()> {
        let provider = AwsCredentialProvider::s3(registry()?).with_chain(chain_credentials());
        let err = provider
            .get_credentials("partial", &VerifyOption::Enabled)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("only one of aws_access_key_id"));
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_chain_fails() -> Result<()> {
        let provider = AwsCredentialProvider::s3(registry()?).with_chain(EmptyChain);
        let err = provider
            .get_credentials("nope", &VerifyOption::Enabled)
            .await
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("s3 credentials"));
        assert!(msg.contains("'nope'"));
        assert!(msg.contains("default AWS credential chain"));
        Ok(())
    }

    #[tokio::test]
    async fn test_wrong_profile_type_fails() -> Result<()> {
        let provider = AwsCredentialProvider::s3(registry()?).with_chain(chain_credentials());
        let err = provider
            .get_credentials("warehouse", &VerifyOption::Enabled)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            TransferError::Infrastructure(InfrastructureError::CredentialResolution { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_ca_bundle_fails() -> Result<()> {
        let provider = AwsCredentialProvider::s3(registry()?).with_chain(EmptyChain);
        let verify = VerifyOption::CaBundle(PathBuf::from("/nonexistent/bundle.pem"));
        let err = provider
            .get_credentials("aws_default", &verify)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("CA bundle"));
        Ok(())
    }

    #[tokio::test]
    async fn test_existing_ca_bundle_and_disabled_verify() -> Result<()> {
        let bundle = tempfile::NamedTempFile::new()?;
        let provider = AwsCredentialProvider::s3(registry()?).with_chain(EmptyChain);

        let verify = VerifyOption::CaBundle(bundle.path().to_path_buf());
        assert!(provider.get_credentials("aws_default", &verify).await.is_ok());
        assert!(
            provider
                .get_credentials("aws_default", &VerifyOption::Disabled)
                .await
                .is_ok()
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_errors_never_carry_secret() -> Result<()> {
        let provider = AwsCredentialProvider::s3(registry()?).with_chain(EmptyChain);
        let verify = VerifyOption::CaBundle(PathBuf::from("/nonexistent.pem"));
        let err = provider
            .get_credentials("aws_default", &verify)
            .await
            .unwrap_err();
        assert!(!format!("{err} {err:?}").contains("profile-secret"));
        Ok(())
    }
}

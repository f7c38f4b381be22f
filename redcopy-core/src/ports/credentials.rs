// redcopy-core/src/ports/credentials.rs

// What the transfer needs from a credential store, without knowing where the
// keys actually come from (static profile, env, instance metadata...).

use crate::domain::transfer::{ResolvedCredentials, VerifyOption};
use crate::error::TransferError;
use async_trait::async_trait;

#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Returns the access/secret pair behind `connection_id`.
    ///
    /// Errors must not carry the secret key.
    async fn get_credentials(
        &self,
        connection_id: &str,
        verify: &VerifyOption,
    ) -> Result<ResolvedCredentials, TransferError>;
}

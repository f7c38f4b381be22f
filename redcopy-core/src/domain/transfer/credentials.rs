// redcopy-core/src/domain/transfer/credentials.rs

use serde::Deserialize;

const REDACTED: &str = "***";

/// A secret string that never shows up in `Debug` output or logs.
///
/// Not `Serialize` on purpose: secrets are read from config, never written.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(REDACTED)
    }
}

/// Access/secret key pair handed to the warehouse inside the COPY statement.
///
/// Held in memory for one invocation only.
#[derive(Clone)]
pub struct ResolvedCredentials {
    access_key: String,
    secret_key: Secret,
}

impl ResolvedCredentials {
    pub fn new(access_key: impl Into<String>, secret_key: Secret) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key,
        }
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    pub(crate) fn secret_key(&self) -> &Secret {
        &self.secret_key
    }
}

impl std::fmt::Debug for ResolvedCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedCredentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &self.secret_key)
            .finish()
    }
}

pub(crate) fn redacted() -> &'static str {
    REDACTED
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_secret() {
        let creds = ResolvedCredentials::new("AKIAEXAMPLE", Secret::new("wJalrXUtnFEMI"));
        let out = format!("{:?}", creds);
        assert!(out.contains("AKIAEXAMPLE"));
        assert!(out.contains("***"));
        assert!(!out.contains("wJalrXUtnFEMI"));
    }

    #[test]
    fn test_secret_deserializes_from_plain_string() -> anyhow::Result<()> {
        let secret: Secret = serde_yaml::from_str("hunter2")?;
        assert_eq!(secret.expose(), "hunter2");
        assert_eq!(format!("{:?}", secret), "***");
        Ok(())
    }
}

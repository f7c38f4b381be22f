// redcopy-core/src/infrastructure/config/connection.rs

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::domain::transfer::Secret;
use crate::infrastructure::error::InfrastructureError;

/// One named entry of `connections.yml`.
#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ConnectionProfile {
    Aws(AwsConnection),
    #[serde(alias = "postgres")]
    Redshift(WarehouseConnection),
}

impl ConnectionProfile {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Aws(_) => "aws",
            Self::Redshift(_) => "redshift",
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AwsConnection {
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<Secret>,
    pub region: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WarehouseConnection {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: Option<Secret>,
    pub sslmode: Option<String>,
    pub connect_timeout_secs: Option<u64>,
}

fn default_port() -> u16 {
    5439
}

/// Named connections, loaded once per invocation.
#[derive(Debug, Clone, Default)]
pub struct ConnectionRegistry {
    connections: HashMap<String, ConnectionProfile>,
}

impl ConnectionRegistry {
    /// Loads `connections.yml` (or `.yaml`) from `config_dir`.
    #[instrument]
    pub fn load(config_dir: &Path) -> Result<Self, InfrastructureError> {
        let path = find_connections_file(config_dir)?;
        info!(path = ?path, "Loading connection registry");

        let content = fs::read_to_string(&path)?;
        let registry = Self::from_yaml_str(&content)?;
        info!(count = registry.connections.len(), "Connections loaded");
        Ok(registry)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, InfrastructureError> {
        let connections: HashMap<String, ConnectionProfile> = serde_yaml::from_str(content)?;
        Ok(Self { connections })
    }

    pub fn get(&self, connection_id: &str) -> Option<&ConnectionProfile> {
        self.connections.get(connection_id)
    }

    /// `Ok(None)` when the id is unknown, an error when it names another kind.
    pub fn aws(&self, connection_id: &str) -> Result<Option<&AwsConnection>, InfrastructureError> {
        match self.get(connection_id) {
            None => Ok(None),
            Some(ConnectionProfile::Aws(aws)) => Ok(Some(aws)),
            Some(other) => Err(InfrastructureError::ConfigError(format!(
                "Connection '{}' is of type '{}', expected 'aws'",
                connection_id,
                other.kind()
            ))),
        }
    }

    pub fn warehouse(&self, connection_id: &str) -> Result<&WarehouseConnection, InfrastructureError> {
        match self.get(connection_id) {
            Some(ConnectionProfile::Redshift(wh)) => Ok(wh),
            Some(other) => Err(InfrastructureError::ConfigError(format!(
                "Connection '{}' is of type '{}', expected 'redshift'",
                connection_id,
                other.kind()
            ))),
            None => Err(InfrastructureError::ConfigError(format!(
                "Connection '{}' is not defined",
                connection_id
            ))),
        }
    }
}

fn find_connections_file(config_dir: &Path) -> Result<PathBuf, InfrastructureError> {
    // Support yml/yaml
    let candidates = ["connections.yml", "connections.yaml"];
    candidates
        .iter()
        .map(|name| config_dir.join(name))
        .find(|p| p.exists())
        .ok_or_else(|| {
            InfrastructureError::ConfigNotFound(format!(
                "No connections file in {:?}. Checked: {:?}",
                config_dir, candidates
            ))
        })
}

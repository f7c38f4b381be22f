// redcopy-core/src/domain/transfer/source.rs

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::error::DomainError;

/// Where the dataset to load lives.
///
/// The configured token is also the scheme of the `FROM` reference in the
/// COPY statement (`s3://...`, `dynamodb://...`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DataSourceKind {
    /// Object storage bucket + key.
    #[default]
    S3,
    /// Key-value table; the location field names the table.
    DynamoDb,
}

impl DataSourceKind {
    pub const ACCEPTED: [&'static str; 2] = ["s3", "dynamodb"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::S3 => "s3",
            Self::DynamoDb => "dynamodb",
        }
    }
}

impl FromStr for DataSourceKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "s3" => Ok(Self::S3),
            "dynamodb" => Ok(Self::DynamoDb),
            other => Err(DomainError::UnsupportedDataSource {
                value: other.to_string(),
                accepted: Self::ACCEPTED.join(", "),
            }),
        }
    }
}

impl TryFrom<String> for DataSourceKind {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DataSourceKind> for String {
    fn from(kind: DataSourceKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for DataSourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

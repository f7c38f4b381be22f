// redcopy-core/src/domain/transfer/operation.rs

use std::str::FromStr;

use crate::domain::error::DomainError;

/// Requested operation mode.
///
/// Only `Copy` has an execution path. `Upsert` is accepted as configuration
/// (it is the default) but refuses to run: nothing in the configuration
/// surface names a merge key or conflict strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperationMode {
    Copy,
    #[default]
    Upsert,
}

impl OperationMode {
    pub const ACCEPTED: [&'static str; 2] = ["COPY", "UPSERT"];

    /// Gate run before any statement is built or any connection opened.
    pub fn validate(mode: &str) -> Result<Self, DomainError> {
        match mode {
            "COPY" => Ok(Self::Copy),
            "UPSERT" => Ok(Self::Upsert),
            other => Err(DomainError::InvalidOperation {
                value: other.to_string(),
                accepted: Self::ACCEPTED.join(", "),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Copy => "COPY",
            Self::Upsert => "UPSERT",
        }
    }
}

impl FromStr for OperationMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::validate(s)
    }
}

impl std::fmt::Display for OperationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

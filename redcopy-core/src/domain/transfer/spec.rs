// redcopy-core/src/domain/transfer/spec.rs

use serde::Deserialize;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use super::operation::OperationMode;
use super::source::DataSourceKind;
use super::verify::VerifyOption;
use crate::domain::error::DomainError;

pub const DEFAULT_WAREHOUSE_CONN_ID: &str = "redshift_default";
pub const DEFAULT_AWS_CONN_ID: &str = "aws_default";

/// Everything one bulk load needs, captured once before the run.
///
/// `source_location` is the bucket for `s3` and the table name for
/// `dynamodb`; `source_key` only means something for `s3`. Both are
/// checked against the source kind when the spec is validated.
///
/// `schema` and `table` end up verbatim in the statement. See
/// [`LoadStatement::build`](crate::domain::compiler::LoadStatement::build).
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
#[validate(schema(function = "validate_source_fields"))]
pub struct TransferSpec {
    #[validate(length(min = 1, message = "schema must not be empty"))]
    pub schema: String,

    #[validate(length(min = 1, message = "table must not be empty"))]
    pub table: String,

    #[serde(default)]
    pub data_source: DataSourceKind,

    #[serde(default, alias = "s3bucket_or_dynamodbtable")]
    pub source_location: Option<String>,

    #[serde(default, alias = "s3_key")]
    pub source_key: Option<String>,

    #[serde(default = "default_warehouse_conn_id", alias = "redshift_conn_id")]
    pub warehouse_conn_id: String,

    #[serde(default = "default_aws_conn_id")]
    pub aws_conn_id: String,

    #[serde(default)]
    pub verify: VerifyOption,

    #[serde(default)]
    pub copy_options: Vec<String>,

    /// Raw mode string; checked by [`OperationMode::validate`] at run time.
    #[serde(default = "default_operation")]
    pub operation: String,

    #[serde(default)]
    pub autocommit: bool,
}

fn default_warehouse_conn_id() -> String {
    DEFAULT_WAREHOUSE_CONN_ID.to_string()
}
fn default_aws_conn_id() -> String {
    DEFAULT_AWS_CONN_ID.to_string()
}
fn default_operation() -> String {
    OperationMode::default().as_str().to_string()
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

fn missing(code: &'static str, message: String) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Owned(message))
}

// s3 needs bucket and key, dynamodb needs the table name.
fn validate_source_fields(spec: &TransferSpec) -> Result<(), ValidationError> {
    if is_blank(&spec.source_location) {
        return Err(missing(
            "source_location",
            format!(
                "{} transfers require source_location (s3bucket_or_dynamodbtable)",
                spec.data_source
            ),
        ));
    }
    if spec.data_source == DataSourceKind::S3 && is_blank(&spec.source_key) {
        return Err(missing(
            "source_key",
            "s3 transfers require source_key (s3_key)".to_string(),
        ));
    }
    Ok(())
}

impl TransferSpec {
    pub fn builder(schema: impl Into<String>, table: impl Into<String>) -> TransferSpecBuilder {
        TransferSpecBuilder::new(schema.into(), table.into())
    }

    /// Runs the field validators, turning failures into a domain error.
    pub fn validated(self) -> Result<Self, DomainError> {
        self.validate()
            .map_err(|e| DomainError::InvalidSpec(e.to_string()))?;
        Ok(self)
    }

    pub fn target(&self) -> String {
        format!("{}.{}", self.schema, self.table)
    }
}

pub struct TransferSpecBuilder {
    spec: TransferSpec,
}

impl TransferSpecBuilder {
    fn new(schema: String, table: String) -> Self {
        Self {
            spec: TransferSpec {
                schema,
                table,
                data_source: DataSourceKind::default(),
                source_location: None,
                source_key: None,
                warehouse_conn_id: default_warehouse_conn_id(),
                aws_conn_id: default_aws_conn_id(),
                verify: VerifyOption::default(),
                copy_options: Vec::new(),
                operation: default_operation(),
                autocommit: false,
            },
        }
    }

    pub fn data_source(mut self, kind: DataSourceKind) -> Self {
        self.spec.data_source = kind;
        self
    }

    pub fn source(mut self, location: impl Into<String>, key: impl Into<String>) -> Self {
        self.spec.source_location = Some(location.into());
        self.spec.source_key = Some(key.into());
        self
    }

    pub fn source_location(mut self, location: impl Into<String>) -> Self {
        self.spec.source_location = Some(location.into());
        self
    }

    pub fn warehouse_conn_id(mut self, conn_id: impl Into<String>) -> Self {
        self.spec.warehouse_conn_id = conn_id.into();
        self
    }

    pub fn aws_conn_id(mut self, conn_id: impl Into<String>) -> Self {
        self.spec.aws_conn_id = conn_id.into();
        self
    }

    pub fn verify(mut self, verify: VerifyOption) -> Self {
        self.spec.verify = verify;
        self
    }

    pub fn copy_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.spec.copy_options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn operation(mut self, operation: impl Into<String>) -> Self {
        self.spec.operation = operation.into();
        self
    }

    pub fn autocommit(mut self, autocommit: bool) -> Self {
        self.spec.autocommit = autocommit;
        self
    }

    pub fn build(self) -> Result<TransferSpec, DomainError> {
        self.spec.validated()
    }
}

// redcopy-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Invalid operation '{value}'; options [{accepted}]")]
    #[diagnostic(
        code(redcopy::domain::operation),
        help("Set `operation` to one of the accepted modes.")
    )]
    InvalidOperation { value: String, accepted: String },

    #[error("{mode} not implemented; only COPY can be executed")]
    #[diagnostic(
        code(redcopy::domain::operation_not_implemented),
        help("No merge key or conflict strategy exists for {mode}. Use operation: COPY.")
    )]
    OperationNotImplemented { mode: String },

    #[error("Unsupported data source '{value}'; options [{accepted}]")]
    #[diagnostic(code(redcopy::domain::data_source))]
    UnsupportedDataSource { value: String, accepted: String },

    #[error("Invalid transfer configuration: {0}")]
    #[diagnostic(code(redcopy::domain::spec))]
    InvalidSpec(String),
}

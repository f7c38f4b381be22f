// redcopy-core/src/domain/transfer/mod.rs

pub mod credentials;
pub mod operation;
pub mod source;
pub mod spec;
pub mod verify;

pub use credentials::{ResolvedCredentials, Secret};
pub use operation::OperationMode;
pub use source::DataSourceKind;
pub use spec::{TransferSpec, TransferSpecBuilder};
pub use verify::VerifyOption;

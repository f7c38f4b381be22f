// redcopy-core/src/application/mod.rs

pub mod engine;
pub mod resolver;
pub mod transfer;

// --- RE-EXPORTS (FACADE PATTERN) ---
// `use redcopy_core::application::{TransferOrchestrator, CredentialResolver};`

pub use engine::execute_statement;
pub use resolver::CredentialResolver;
pub use transfer::{TransferOrchestrator, TransferSummary};

pub mod compiler;
pub mod error;
pub mod transfer;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use error::DomainError;

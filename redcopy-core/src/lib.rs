// redcopy-core/src/lib.rs

// 1. Documentation
#![allow(missing_docs)]

// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- MODULES HEXAGONAUX ---

// 1. Ports (Interfaces / Traits)
// Credential providers and warehouse sessions.
pub mod ports;

// 2. Domain (Cœur du métier)
// Transfer spec, operation modes, COPY statement rendering.
// Ne dépend de RIEN d'autre (ni infra, ni app).
pub mod domain;

// 3. Infrastructure (Adapters)
// connections.yml, AWS credentials, Redshift over tokio-postgres.
pub mod infrastructure;

// 4. Application (Use Cases)
// Credential resolution, execution engine, transfer orchestration.
pub mod application;

// --- GESTION DES ERREURS GLOBALE ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use application::{CredentialResolver, TransferOrchestrator};
pub use domain::transfer::{DataSourceKind, OperationMode, TransferSpec};
pub use error::TransferError;

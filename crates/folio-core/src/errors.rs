//! Cross-cutting error types for Folio.
//!
//! Domain-specific errors (`FetchError`, `ConfigError`, `DisplayError`) live
//! in their respective crates and converge into `anyhow` in `folio-cli`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Snapshot data failed validation (counts must be plain decimals).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A field name did not match any tracked counter.
    #[error("Unknown stat field: {0}")]
    UnknownField(String),
}

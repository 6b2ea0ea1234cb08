//! Ledger error model.

use thiserror::Error;

/// Result type used across the ledger engine.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Ledger-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, configuration). Presentation concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// A referenced account, entry, or system account does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Posting gate: total debits and credits over an entry's lines differ.
    #[error("unbalanced entry: debits {debits} != credits {credits}")]
    Unbalanced { debits: i128, credits: i128 },

    /// A required system account is missing or ambiguously configured.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Storage-level contention. Retryable by the caller.
    #[error("concurrency error: {0}")]
    Concurrency(String),

    /// A value failed validation (e.g. malformed line, negative amount).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A conflict occurred (e.g. duplicate account code, double posting).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl LedgerError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn unbalanced(debits: i128, credits: i128) -> Self {
        Self::Unbalanced { debits, credits }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn concurrency(msg: impl Into<String>) -> Self {
        Self::Concurrency(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}

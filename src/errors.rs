use thiserror::Error;

use crate::domain::{RecordId, RecordKind};

/// Error type that captures ledger and record store failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid month: {0} (expected 1-12)")]
    InvalidMonth(u32),
    #[error("Invalid year: {0}")]
    InvalidYear(i32),
    #[error("{kind} {id} not found")]
    NotFound { kind: RecordKind, id: RecordId },
    #[error("{kind} named `{name}` already exists")]
    Duplicate { kind: RecordKind, name: String },
    #[error("Constraint violation: {0}")]
    Constraint(String),
    #[error("Amount overflow: {0}")]
    Overflow(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;

impl LedgerError {
    pub fn not_found(kind: RecordKind, id: RecordId) -> Self {
        LedgerError::NotFound { kind, id }
    }

    /// Returns `true` for lookups that missed, as opposed to store failures.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LedgerError::NotFound { .. })
    }
}

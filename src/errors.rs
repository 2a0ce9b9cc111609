use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::ledger::RecordKind;

/// Error type that captures ledger validation and persistence failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Invalid amount: {0} (must be greater than zero)")]
    InvalidAmount(Decimal),
    #[error("{kind} not found: {id}")]
    NotFound { kind: RecordKind, id: Uuid },
    #[error("Bill already paid: {0}")]
    BillAlreadyPaid(Uuid),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl LedgerError {
    pub(crate) fn not_found(kind: RecordKind, id: Uuid) -> Self {
        LedgerError::NotFound { kind, id }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        LedgerError::Validation(message.into())
    }

    /// Returns `true` for errors caused by caller input rather than storage.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            LedgerError::Validation(_)
                | LedgerError::InvalidAmount(_)
                | LedgerError::NotFound { .. }
                | LedgerError::BillAlreadyPaid(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;

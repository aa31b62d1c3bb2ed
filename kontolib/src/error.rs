//! Единый тип ошибок публичного API.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KontoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed statement: {0}")]
    Malformed(String),

    #[error("unsupported statement shape: {0}")]
    UnsupportedShape(String),

    #[error("currency mismatch: entry {entry} vs transaction {tx}")]
    CurrencyMismatch { entry: String, tx: String },

    #[error("self name '{0}' found in neither creditor nor debtor")]
    AmbiguousParty(String),

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, KontoError>;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Please login")]
    Unauthenticated,
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("Cannot create payment: billing was due at {due_date}")]
    PastDue { due_date: DateTime<Utc> },
    #[error("Payment exceeds billing total: at most {remaining} can still be paid")]
    AmountExceeded { remaining: BigDecimal },
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Prefix a storage failure with the operation it interrupted.
    ///
    /// Typed rejections (not found, past due, ...) pass through unchanged so
    /// callers can still tell them apart.
    pub fn during(self, operation: &str) -> Self {
        match self {
            DomainError::Internal(msg) => DomainError::Internal(format!("{operation} failed: {msg}")),
            other => other,
        }
    }
}

//! Domain errors

use thiserror::Error;

/// Domain-level error types
#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed or policy-violating input
    #[error("Validation: {0}")]
    Validation(String),

    /// Credit card verification declined the payment
    #[error("Payment not confirmed for reference: {reference}")]
    PaymentDeclined { reference: String },

    /// Persistence layer failure
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

//! Bank-transfer notification parsing
//!
//! Incoming payment updates carry a free-text transaction description whose
//! second whitespace-separated token is the reservation's payment reference,
//! e.g. `"1401541457 P4145478"`.

use crate::domain::{DomainError, DomainResult};

/// Payment references embedded in transaction descriptions are exactly 8 characters.
pub const PAYMENT_REFERENCE_LEN: usize = 8;

/// Extract the payment reference from a transaction description.
///
/// The description is trimmed and split on runs of whitespace; the second
/// token is the candidate reference and is returned unchanged (no case
/// normalization, no charset checks beyond length).
pub fn extract_reservation_reference(transaction_description: &str) -> DomainResult<&str> {
    let mut tokens = transaction_description.split_whitespace();

    let (Some(_), Some(reference)) = (tokens.next(), tokens.next()) else {
        return Err(DomainError::Validation(format!(
            "invalid transaction description format: {}",
            transaction_description
        )));
    };

    if reference.len() != PAYMENT_REFERENCE_LEN {
        return Err(DomainError::Validation(format!(
            "payment reference in transaction description is not {} characters: {}",
            PAYMENT_REFERENCE_LEN, reference
        )));
    }

    Ok(reference)
}

// ── Tests ──────────────────────────────────────────────────────

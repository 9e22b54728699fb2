//! Outbound ports: interfaces to external payment collaborators
//!
//! [`CardPaymentVerifier`] is the architectural contract that decouples the
//! reservation lifecycle from the concrete card-payment transport. The
//! production implementation lives in
//! [`HttpCardPaymentVerifier`](crate::infrastructure::payment::HttpCardPaymentVerifier).

use async_trait::async_trait;

/// Port for querying the external card-payment service.
#[async_trait]
pub trait CardPaymentVerifier: Send + Sync {
    /// Whether the card payment behind `payment_reference` is confirmed.
    ///
    /// Implementations must answer `false` for any transport or protocol
    /// failure; a failed verification call is never a confirmation.
    async fn is_confirmed(&self, payment_reference: &str) -> bool;
}

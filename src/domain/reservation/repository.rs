//! Reservation repository interface

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::{Reservation, ReservationStatus};
use crate::domain::DomainResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Insert a new reservation and return it with its store-assigned id
    async fn save(&self, reservation: Reservation) -> DomainResult<Reservation>;

    /// Find reservation by ID
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Reservation>>;

    /// Find the reservation carrying the given payment reference
    async fn find_by_payment_reference(
        &self,
        reference: &str,
    ) -> DomainResult<Option<Reservation>>;

    /// Find all reservations in the given status created on or before `cutoff`
    async fn find_by_status_created_on_or_before(
        &self,
        status: ReservationStatus,
        cutoff: NaiveDate,
    ) -> DomainResult<Vec<Reservation>>;

    /// Atomically move a reservation from `from` to `to`.
    ///
    /// Returns `false` when the reservation is missing or no longer in the
    /// `from` status, so concurrent check-then-act sequences (bank-transfer
    /// confirmation vs. overdue cancellation) cannot both win on one record.
    async fn transition_status(
        &self,
        id: i64,
        from: ReservationStatus,
        to: ReservationStatus,
    ) -> DomainResult<bool>;
}

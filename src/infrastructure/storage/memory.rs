//! In-memory repository implementation

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;

use crate::domain::{
    DomainResult, Reservation, ReservationRepository, ReservationStatus,
};

/// In-memory reservation store for development and testing
#[derive(Default)]
pub struct InMemoryReservationRepository {
    reservations: DashMap<i64, Reservation>,
    id_counter: AtomicI64,
}

impl InMemoryReservationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> i64 {
        self.id_counter.fetch_add(1, Ordering::SeqCst) + 1
    }
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn save(&self, mut reservation: Reservation) -> DomainResult<Reservation> {
        let id = self.next_id();
        reservation.id = Some(id);
        self.reservations.insert(id, reservation.clone());
        Ok(reservation)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Reservation>> {
        Ok(self.reservations.get(&id).map(|r| r.clone()))
    }

    async fn find_by_payment_reference(
        &self,
        reference: &str,
    ) -> DomainResult<Option<Reservation>> {
        Ok(self
            .reservations
            .iter()
            .find(|r| r.payment_reference.as_deref() == Some(reference))
            .map(|r| r.clone()))
    }

    async fn find_by_status_created_on_or_before(
        &self,
        status: ReservationStatus,
        cutoff: NaiveDate,
    ) -> DomainResult<Vec<Reservation>> {
        Ok(self
            .reservations
            .iter()
            .filter(|r| r.status == status && r.creation_date <= cutoff)
            .map(|r| r.clone())
            .collect())
    }

    async fn transition_status(
        &self,
        id: i64,
        from: ReservationStatus,
        to: ReservationStatus,
    ) -> DomainResult<bool> {
        // The dashmap entry lock makes the check-and-set atomic.
        match self.reservations.get_mut(&id) {
            Some(mut entry) if entry.status == from => {
                entry.status = to;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

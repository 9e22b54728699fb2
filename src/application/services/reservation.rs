//! Reservation lifecycle business logic
//!
//! Decides the initial status of a reservation from its payment mode,
//! applies asynchronous bank-transfer confirmations, and cancels
//! reservations whose bank transfer never arrived.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use tracing::{info, warn};

use crate::application::ports::CardPaymentVerifier;
use crate::domain::{
    extract_reservation_reference, validate_reservation_period, DomainError, DomainResult,
    PaymentMode, Reservation, ReservationRepository, ReservationStatus, RoomSegment,
};

/// A pending bank transfer is overdue this many days after creation.
pub const OVERDUE_AFTER_DAYS: i64 = 2;

/// Validated reservation creation command
#[derive(Debug, Clone)]
pub struct CreateReservation {
    pub customer_name: String,
    pub room_number: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub room_segment: RoomSegment,
    pub payment_mode: PaymentMode,
    pub payment_reference: Option<String>,
}

/// Service for the reservation lifecycle
pub struct ReservationService {
    repository: Arc<dyn ReservationRepository>,
    card_payments: Arc<dyn CardPaymentVerifier>,
}

impl ReservationService {
    pub fn new(
        repository: Arc<dyn ReservationRepository>,
        card_payments: Arc<dyn CardPaymentVerifier>,
    ) -> Self {
        Self {
            repository,
            card_payments,
        }
    }

    /// Create a reservation, deciding its status from the payment mode.
    ///
    /// Cash confirms immediately. Credit card is verified synchronously
    /// against the card-payment service and a declined payment fails the
    /// creation. Bank transfer is stored as pending until the matching
    /// payment update arrives. The reservation is persisted exactly once,
    /// on success only, and the returned record is the stored one.
    pub async fn confirm_reservation(
        &self,
        request: CreateReservation,
    ) -> DomainResult<Reservation> {
        validate_reservation_period(request.start_date, request.end_date)?;

        let reference = request
            .payment_reference
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty());

        let status = match request.payment_mode {
            PaymentMode::Cash => ReservationStatus::Confirmed,

            PaymentMode::CreditCard => {
                let reference = reference.ok_or_else(|| {
                    DomainError::Validation(
                        "payment reference is required for credit card payment".to_string(),
                    )
                })?;
                if self.card_payments.is_confirmed(reference).await {
                    ReservationStatus::Confirmed
                } else {
                    return Err(DomainError::PaymentDeclined {
                        reference: reference.to_string(),
                    });
                }
            }

            PaymentMode::BankTransfer => {
                if reference.is_none() {
                    return Err(DomainError::Validation(
                        "payment reference is required for bank transfer payment".to_string(),
                    ));
                }
                ReservationStatus::PendingPayment
            }
        };

        let reservation = Reservation::new(
            request.customer_name,
            request.room_number,
            request.start_date,
            request.end_date,
            request.room_segment,
            request.payment_mode,
            request.payment_reference,
            status,
        );

        let saved = self.repository.save(reservation).await?;
        info!(
            id = saved.id,
            status = %saved.status,
            payment_mode = %saved.payment_mode,
            "reservation created"
        );
        Ok(saved)
    }

    /// Apply an inbound bank-transfer payment update.
    ///
    /// The transaction description carries the payment reference. An
    /// unmatched reference and a reservation that already left
    /// `PENDING_PAYMENT` are both handled terminally, so redelivery of the
    /// same notification is a no-op rather than an error.
    pub async fn confirm_bank_transfer_payment(
        &self,
        transaction_description: &str,
    ) -> DomainResult<()> {
        let reference = extract_reservation_reference(transaction_description)?;

        let Some(reservation) = self.repository.find_by_payment_reference(reference).await? else {
            warn!(reference, "reservation not found for payment reference");
            return Ok(());
        };

        if !reservation.is_pending_payment() {
            info!(
                id = reservation.id,
                status = %reservation.status,
                "reservation already settled, no change made"
            );
            return Ok(());
        }

        let id = stored_id(&reservation)?;
        if self
            .repository
            .transition_status(
                id,
                ReservationStatus::PendingPayment,
                ReservationStatus::Confirmed,
            )
            .await?
        {
            info!(id, "reservation confirmed via bank transfer update");
        } else {
            // Lost a race against a concurrent confirmation or cancellation.
            info!(id, "reservation left pending state concurrently, no change made");
        }
        Ok(())
    }

    /// Cancel a pending reservation.
    ///
    /// Missing ids and reservations in any status other than
    /// `PENDING_PAYMENT` are no-ops; a stale sweep result must never cancel
    /// an already-confirmed reservation.
    pub async fn cancel_reservation(&self, reservation_id: i64) -> DomainResult<()> {
        let Some(reservation) = self.repository.find_by_id(reservation_id).await? else {
            return Ok(());
        };

        if !reservation.is_pending_payment() {
            return Ok(());
        }

        if self
            .repository
            .transition_status(
                reservation_id,
                ReservationStatus::PendingPayment,
                ReservationStatus::Cancelled,
            )
            .await?
        {
            info!(
                id = reservation_id,
                "reservation automatically cancelled due to overdue payment"
            );
        }
        Ok(())
    }

    /// Cancel bank-transfer reservations still pending two days after creation.
    ///
    /// Returns the number of reservations checked. A failure on one record
    /// is logged and does not abort the rest of the sweep.
    pub async fn run_daily_sweep(&self, today: NaiveDate) -> DomainResult<usize> {
        let cutoff = today - Duration::days(OVERDUE_AFTER_DAYS);

        let overdue: Vec<Reservation> = self
            .repository
            .find_by_status_created_on_or_before(ReservationStatus::PendingPayment, cutoff)
            .await?
            .into_iter()
            .filter(|r| r.payment_mode == PaymentMode::BankTransfer)
            .collect();

        if overdue.is_empty() {
            info!("no overdue reservation found");
            return Ok(0);
        }

        let checked = overdue.len();
        for reservation in overdue {
            let Some(id) = reservation.id else { continue };
            if let Err(e) = self.cancel_reservation(id).await {
                warn!(id, error = %e, "failed to cancel overdue reservation");
            }
        }
        Ok(checked)
    }
}

fn stored_id(reservation: &Reservation) -> DomainResult<i64> {
    reservation
        .id
        .ok_or_else(|| DomainError::Storage("stored reservation has no id".to_string()))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;

    /// Repository double recording every write.
    #[derive(Default)]
    struct RecordingRepository {
        rows: Mutex<Vec<Reservation>>,
        save_calls: AtomicUsize,
        transition_calls: AtomicUsize,
    }

    impl RecordingRepository {
        fn seed(&self, mut reservation: Reservation) -> i64 {
            let mut rows = self.rows.lock().unwrap();
            let id = rows.len() as i64 + 1;
            reservation.id = Some(id);
            rows.push(reservation);
            id
        }

        fn status_of(&self, id: i64) -> ReservationStatus {
            self.rows
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.id == Some(id))
                .map(|r| r.status)
                .unwrap()
        }

        fn saves(&self) -> usize {
            self.save_calls.load(Ordering::SeqCst)
        }

        fn transitions(&self) -> usize {
            self.transition_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ReservationRepository for RecordingRepository {
        async fn save(&self, mut reservation: Reservation) -> DomainResult<Reservation> {
            self.save_calls.fetch_add(1, Ordering::SeqCst);
            let mut rows = self.rows.lock().unwrap();
            reservation.id = Some(rows.len() as i64 + 1);
            rows.push(reservation.clone());
            Ok(reservation)
        }

        async fn find_by_id(&self, id: i64) -> DomainResult<Option<Reservation>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.id == Some(id))
                .cloned())
        }

        async fn find_by_payment_reference(
            &self,
            reference: &str,
        ) -> DomainResult<Option<Reservation>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.payment_reference.as_deref() == Some(reference))
                .cloned())
        }

        async fn find_by_status_created_on_or_before(
            &self,
            status: ReservationStatus,
            cutoff: NaiveDate,
        ) -> DomainResult<Vec<Reservation>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.status == status && r.creation_date <= cutoff)
                .cloned()
                .collect())
        }

        async fn transition_status(
            &self,
            id: i64,
            from: ReservationStatus,
            to: ReservationStatus,
        ) -> DomainResult<bool> {
            self.transition_calls.fetch_add(1, Ordering::SeqCst);
            let mut rows = self.rows.lock().unwrap();
            match rows
                .iter_mut()
                .find(|r| r.id == Some(id) && r.status == from)
            {
                Some(row) => {
                    row.status = to;
                    Ok(true)
                }
                None => Ok(false),
            }
        }
    }

    /// Verifier double with a fixed answer.
    struct StubVerifier {
        answer: bool,
        calls: AtomicUsize,
        last_reference: Mutex<Option<String>>,
    }

    impl StubVerifier {
        fn answering(answer: bool) -> Self {
            Self {
                answer,
                calls: AtomicUsize::new(0),
                last_reference: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl CardPaymentVerifier for StubVerifier {
        async fn is_confirmed(&self, payment_reference: &str) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_reference.lock().unwrap() = Some(payment_reference.to_string());
            self.answer
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request(payment_mode: PaymentMode, payment_reference: Option<&str>) -> CreateReservation {
        CreateReservation {
            customer_name: "Alice Smith".to_string(),
            room_number: "101".to_string(),
            start_date: date(2026, 9, 1),
            end_date: date(2026, 9, 3),
            room_segment: RoomSegment::Medium,
            payment_mode,
            payment_reference: payment_reference.map(String::from),
        }
    }

    fn service_with(
        answer: bool,
    ) -> (
        ReservationService,
        Arc<RecordingRepository>,
        Arc<StubVerifier>,
    ) {
        let repository = Arc::new(RecordingRepository::default());
        let verifier = Arc::new(StubVerifier::answering(answer));
        let service = ReservationService::new(repository.clone(), verifier.clone());
        (service, repository, verifier)
    }

    fn pending_bank_transfer(reference: &str, creation_date: NaiveDate) -> Reservation {
        let mut r = Reservation::new(
            "Bob Jones",
            "202",
            date(2026, 9, 10),
            date(2026, 9, 12),
            RoomSegment::Small,
            PaymentMode::BankTransfer,
            Some(reference.to_string()),
            ReservationStatus::PendingPayment,
        );
        r.creation_date = creation_date;
        r
    }

    // ── Creation ───────────────────────────────────────────────

    #[tokio::test]
    async fn cash_reservation_confirms_without_verifier() {
        let (service, repository, verifier) = service_with(false);

        let saved = service
            .confirm_reservation(request(PaymentMode::Cash, None))
            .await
            .unwrap();

        assert_eq!(saved.status, ReservationStatus::Confirmed);
        assert!(saved.id.is_some());
        assert_eq!(repository.saves(), 1);
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn confirmed_credit_card_reservation_is_persisted() {
        let (service, repository, verifier) = service_with(true);

        let saved = service
            .confirm_reservation(request(PaymentMode::CreditCard, Some("CARD1234")))
            .await
            .unwrap();

        assert_eq!(saved.status, ReservationStatus::Confirmed);
        assert_eq!(repository.saves(), 1);
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            verifier.last_reference.lock().unwrap().as_deref(),
            Some("CARD1234")
        );
    }

    #[tokio::test]
    async fn declined_credit_card_fails_without_persisting() {
        let (service, repository, _verifier) = service_with(false);

        let err = service
            .confirm_reservation(request(PaymentMode::CreditCard, Some("CARD1234")))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::PaymentDeclined { .. }));
        assert_eq!(repository.saves(), 0);
    }

    #[tokio::test]
    async fn credit_card_without_reference_is_a_validation_error() {
        let (service, repository, verifier) = service_with(true);

        let err = service
            .confirm_reservation(request(PaymentMode::CreditCard, None))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(repository.saves(), 0);
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn bank_transfer_with_blank_reference_is_a_validation_error() {
        let (service, repository, _verifier) = service_with(true);

        let err = service
            .confirm_reservation(request(PaymentMode::BankTransfer, Some("   ")))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(repository.saves(), 0);
    }

    #[tokio::test]
    async fn bank_transfer_reservation_is_pending_without_verifier() {
        let (service, repository, verifier) = service_with(false);

        let saved = service
            .confirm_reservation(request(PaymentMode::BankTransfer, Some("P4145478")))
            .await
            .unwrap();

        assert_eq!(saved.status, ReservationStatus::PendingPayment);
        assert_eq!(repository.saves(), 1);
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn invalid_period_fails_before_any_collaborator_call() {
        let (service, repository, verifier) = service_with(true);

        let mut bad = request(PaymentMode::CreditCard, Some("CARD1234"));
        bad.end_date = bad.start_date;
        let err = service.confirm_reservation(bad).await.unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(repository.saves(), 0);
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 0);
    }

    // ── Bank-transfer confirmation ─────────────────────────────

    #[tokio::test]
    async fn payment_update_confirms_pending_reservation() {
        let (service, repository, _verifier) = service_with(false);
        let id = repository.seed(pending_bank_transfer("P4145478", Utc::now().date_naive()));

        service
            .confirm_bank_transfer_payment("1401541457 P4145478")
            .await
            .unwrap();

        assert_eq!(repository.status_of(id), ReservationStatus::Confirmed);
        assert_eq!(repository.transitions(), 1);
    }

    #[tokio::test]
    async fn repeated_payment_update_is_idempotent() {
        let (service, repository, _verifier) = service_with(false);
        let id = repository.seed(pending_bank_transfer("P4145478", Utc::now().date_naive()));

        service
            .confirm_bank_transfer_payment("1401541457 P4145478")
            .await
            .unwrap();
        service
            .confirm_bank_transfer_payment("1401541457 P4145478")
            .await
            .unwrap();

        // The second delivery sees a confirmed reservation and writes nothing.
        assert_eq!(repository.status_of(id), ReservationStatus::Confirmed);
        assert_eq!(repository.transitions(), 1);
        assert_eq!(repository.saves(), 0);
    }

    #[tokio::test]
    async fn unmatched_reference_is_reported_but_not_an_error() {
        let (service, repository, _verifier) = service_with(false);

        service
            .confirm_bank_transfer_payment("1401541457 NOMATCH1")
            .await
            .unwrap();

        assert_eq!(repository.saves(), 0);
        assert_eq!(repository.transitions(), 0);
    }

    #[tokio::test]
    async fn malformed_description_propagates_validation_error() {
        let (service, repository, _verifier) = service_with(false);

        let err = service
            .confirm_bank_transfer_payment("onlyoneword")
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(repository.transitions(), 0);
    }

    // ── Cancellation ───────────────────────────────────────────

    #[tokio::test]
    async fn cancelling_a_missing_reservation_is_a_noop() {
        let (service, repository, _verifier) = service_with(false);

        service.cancel_reservation(42).await.unwrap();

        assert_eq!(repository.transitions(), 0);
    }

    #[tokio::test]
    async fn cancelling_a_confirmed_reservation_is_a_noop() {
        let (service, repository, _verifier) = service_with(false);
        let mut confirmed = pending_bank_transfer("P4145478", Utc::now().date_naive());
        confirmed.status = ReservationStatus::Confirmed;
        let id = repository.seed(confirmed);

        service.cancel_reservation(id).await.unwrap();

        assert_eq!(repository.status_of(id), ReservationStatus::Confirmed);
        assert_eq!(repository.transitions(), 0);
    }

    #[tokio::test]
    async fn cancelling_a_pending_reservation_transitions_it() {
        let (service, repository, _verifier) = service_with(false);
        let id = repository.seed(pending_bank_transfer("P4145478", Utc::now().date_naive()));

        service.cancel_reservation(id).await.unwrap();

        assert_eq!(repository.status_of(id), ReservationStatus::Cancelled);
    }

    // ── Overdue sweep ──────────────────────────────────────────

    #[tokio::test]
    async fn sweep_cancels_exactly_the_overdue_pending_bank_transfers() {
        let (service, repository, _verifier) = service_with(false);
        let today = date(2026, 8, 28);

        let three_days_old =
            repository.seed(pending_bank_transfer("REF00001", today - Duration::days(3)));
        let two_days_old =
            repository.seed(pending_bank_transfer("REF00002", today - Duration::days(2)));
        let created_tomorrow =
            repository.seed(pending_bank_transfer("REF00003", today + Duration::days(1)));
        let mut confirmed = pending_bank_transfer("REF00004", today - Duration::days(3));
        confirmed.status = ReservationStatus::Confirmed;
        let already_confirmed = repository.seed(confirmed);

        let checked = service.run_daily_sweep(today).await.unwrap();

        assert_eq!(checked, 2);
        assert_eq!(
            repository.status_of(three_days_old),
            ReservationStatus::Cancelled
        );
        assert_eq!(
            repository.status_of(two_days_old),
            ReservationStatus::Cancelled
        );
        assert_eq!(
            repository.status_of(created_tomorrow),
            ReservationStatus::PendingPayment
        );
        assert_eq!(
            repository.status_of(already_confirmed),
            ReservationStatus::Confirmed
        );
    }

    #[tokio::test]
    async fn sweep_ignores_overdue_non_bank_transfer_reservations() {
        let (service, repository, _verifier) = service_with(false);
        let today = date(2026, 8, 28);

        let mut cash = pending_bank_transfer("REF00005", today - Duration::days(5));
        cash.payment_mode = PaymentMode::Cash;
        let id = repository.seed(cash);

        let checked = service.run_daily_sweep(today).await.unwrap();

        assert_eq!(checked, 0);
        assert_eq!(repository.status_of(id), ReservationStatus::PendingPayment);
    }

    #[tokio::test]
    async fn sweep_with_no_matches_returns_zero() {
        let (service, _repository, _verifier) = service_with(false);

        let checked = service.run_daily_sweep(date(2026, 8, 28)).await.unwrap();

        assert_eq!(checked, 0);
    }
}

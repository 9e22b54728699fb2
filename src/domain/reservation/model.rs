//! Reservation domain entity

use chrono::{NaiveDate, Utc};

use crate::domain::{DomainError, DomainResult};

/// Shortest and longest allowed stay, in nights (`end_date - start_date`).
pub const MIN_STAY_DAYS: i64 = 1;
pub const MAX_STAY_DAYS: i64 = 30;

/// Reservation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationStatus {
    /// Payment settled, room is booked
    Confirmed,
    /// Bank transfer announced but not yet received
    PendingPayment,
    /// Cancelled by the overdue-payment sweep
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "CONFIRMED",
            Self::PendingPayment => "PENDING_PAYMENT",
            Self::Cancelled => "CANCELLED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "CONFIRMED" => Some(Self::Confirmed),
            "PENDING_PAYMENT" => Some(Self::PendingPayment),
            "CANCELLED" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Confirmed and Cancelled accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::PendingPayment)
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment mode chosen at booking time; decides the confirmation path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMode {
    Cash,
    CreditCard,
    BankTransfer,
}

impl PaymentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "CASH",
            Self::CreditCard => "CREDIT_CARD",
            Self::BankTransfer => "BANK_TRANSFER",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "CASH" => Some(Self::Cash),
            "CREDIT_CARD" => Some(Self::CreditCard),
            "BANK_TRANSFER" => Some(Self::BankTransfer),
            _ => None,
        }
    }

    /// Non-cash modes carry an external payment reference.
    pub fn requires_payment_reference(&self) -> bool {
        !matches!(self, Self::Cash)
    }
}

impl std::fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Room size category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomSegment {
    Small,
    Medium,
    Large,
}

impl RoomSegment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "SMALL",
            Self::Medium => "MEDIUM",
            Self::Large => "LARGE",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "SMALL" => Some(Self::Small),
            "MEDIUM" => Some(Self::Medium),
            "LARGE" => Some(Self::Large),
            _ => None,
        }
    }
}

impl std::fmt::Display for RoomSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Room reservation
#[derive(Debug, Clone)]
pub struct Reservation {
    /// Store-assigned identifier, present only after first persistence
    pub id: Option<i64>,
    pub customer_name: String,
    pub room_number: String,
    /// First night of the stay
    pub start_date: NaiveDate,
    /// Last night of the stay
    pub end_date: NaiveDate,
    pub room_segment: RoomSegment,
    pub payment_mode: PaymentMode,
    /// External payment reference; required for non-cash modes
    pub payment_reference: Option<String>,
    pub status: ReservationStatus,
    /// Date the record was first built
    pub creation_date: NaiveDate,
}

impl Reservation {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        customer_name: impl Into<String>,
        room_number: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        room_segment: RoomSegment,
        payment_mode: PaymentMode,
        payment_reference: Option<String>,
        status: ReservationStatus,
    ) -> Self {
        Self {
            id: None,
            customer_name: customer_name.into(),
            room_number: room_number.into(),
            start_date,
            end_date,
            room_segment,
            payment_mode,
            payment_reference,
            status,
            creation_date: Utc::now().date_naive(),
        }
    }

    pub fn is_pending_payment(&self) -> bool {
        self.status == ReservationStatus::PendingPayment
    }
}

// ── Period validation ───────────────────────────────────────────

/// Validate the stay period independent of any request framework.
///
/// The stay length is the raw day difference `end - start`: a one-night
/// booking spans one day and a same-day start/end is rejected. Stays
/// longer than 30 days are rejected.
pub fn validate_reservation_period(start: NaiveDate, end: NaiveDate) -> DomainResult<()> {
    if start > end {
        return Err(DomainError::Validation(format!(
            "start date {} cannot be after end date {}",
            start, end
        )));
    }

    let days = (end - start).num_days();
    if !(MIN_STAY_DAYS..=MAX_STAY_DAYS).contains(&days) {
        return Err(DomainError::Validation(format!(
            "reservation period must be between {} and {} days, got {}",
            MIN_STAY_DAYS, MAX_STAY_DAYS, days
        )));
    }

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_reservation() -> Reservation {
        Reservation::new(
            "Alice Smith",
            "101",
            date(2026, 9, 1),
            date(2026, 9, 3),
            RoomSegment::Medium,
            PaymentMode::Cash,
            None,
            ReservationStatus::Confirmed,
        )
    }

    #[test]
    fn new_reservation_has_no_id_and_todays_creation_date() {
        let r = sample_reservation();
        assert!(r.id.is_none());
        assert_eq!(r.creation_date, Utc::now().date_naive());
        assert_eq!(r.status, ReservationStatus::Confirmed);
    }

    #[test]
    fn status_string_roundtrip() {
        for status in &[
            ReservationStatus::Confirmed,
            ReservationStatus::PendingPayment,
            ReservationStatus::Cancelled,
        ] {
            assert_eq!(ReservationStatus::from_str(status.as_str()), Some(*status));
        }
        assert_eq!(ReservationStatus::from_str("UNKNOWN"), None);
    }

    #[test]
    fn payment_mode_string_roundtrip() {
        for mode in &[
            PaymentMode::Cash,
            PaymentMode::CreditCard,
            PaymentMode::BankTransfer,
        ] {
            assert_eq!(PaymentMode::from_str(mode.as_str()), Some(*mode));
        }
        assert_eq!(PaymentMode::from_str("CRYPTO"), None);
    }

    #[test]
    fn only_pending_payment_is_non_terminal() {
        assert!(ReservationStatus::Confirmed.is_terminal());
        assert!(ReservationStatus::Cancelled.is_terminal());
        assert!(!ReservationStatus::PendingPayment.is_terminal());
    }

    #[test]
    fn cash_needs_no_reference_other_modes_do() {
        assert!(!PaymentMode::Cash.requires_payment_reference());
        assert!(PaymentMode::CreditCard.requires_payment_reference());
        assert!(PaymentMode::BankTransfer.requires_payment_reference());
    }

    #[test]
    fn one_night_stay_is_valid() {
        assert!(validate_reservation_period(date(2026, 9, 1), date(2026, 9, 2)).is_ok());
    }

    #[test]
    fn thirty_day_stay_is_valid() {
        assert!(validate_reservation_period(date(2026, 9, 1), date(2026, 10, 1)).is_ok());
    }

    #[test]
    fn same_day_stay_is_rejected() {
        let err = validate_reservation_period(date(2026, 9, 1), date(2026, 9, 1)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn stay_over_thirty_days_is_rejected() {
        let err = validate_reservation_period(date(2026, 9, 1), date(2026, 10, 2)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn inverted_dates_are_rejected() {
        let err = validate_reservation_period(date(2026, 9, 3), date(2026, 9, 1)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}

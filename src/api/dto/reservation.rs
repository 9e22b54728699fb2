//! Reservation DTOs

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::application::services::CreateReservation;
use crate::domain::{DomainError, DomainResult, PaymentMode, Reservation, RoomSegment};

/// Reservation creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "customer_name": "Alice Smith",
    "room_number": "101",
    "start_date": "2026-09-01",
    "end_date": "2026-09-03",
    "room_segment": "MEDIUM",
    "payment_mode": "BANK_TRANSFER",
    "payment_reference": "P4145478"
}))]
pub struct ReservationRequest {
    #[validate(length(min = 1, message = "customer name is required"))]
    pub customer_name: String,

    #[validate(length(min = 1, message = "room number is required"))]
    pub room_number: String,

    /// First night of the stay (ISO date)
    #[validate(custom(function = validate_future_or_present))]
    pub start_date: NaiveDate,

    /// Last night of the stay (ISO date)
    pub end_date: NaiveDate,

    /// Room size category: `SMALL`, `MEDIUM`, `LARGE`
    pub room_segment: String,

    /// Payment mode: `CASH`, `CREDIT_CARD`, `BANK_TRANSFER`
    pub payment_mode: String,

    /// External payment reference; required for non-cash modes
    pub payment_reference: Option<String>,
}

fn validate_future_or_present(start_date: &NaiveDate) -> Result<(), ValidationError> {
    if *start_date < Utc::now().date_naive() {
        let mut err = ValidationError::new("future_or_present");
        err.message = Some("start date must be today or in the future".into());
        return Err(err);
    }
    Ok(())
}

impl ReservationRequest {
    /// Parse the closed-set fields into domain enums.
    pub fn into_command(self) -> DomainResult<CreateReservation> {
        let room_segment = RoomSegment::from_str(&self.room_segment).ok_or_else(|| {
            DomainError::Validation(format!("invalid room segment: {}", self.room_segment))
        })?;
        let payment_mode = PaymentMode::from_str(&self.payment_mode).ok_or_else(|| {
            DomainError::Validation(format!("invalid payment mode: {}", self.payment_mode))
        })?;

        Ok(CreateReservation {
            customer_name: self.customer_name,
            room_number: self.room_number,
            start_date: self.start_date,
            end_date: self.end_date,
            room_segment,
            payment_mode,
            payment_reference: self.payment_reference,
        })
    }
}

/// Reservation creation result
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReservationResponse {
    /// Store-assigned reservation id
    pub reservation_id: i64,
    /// Final status: `CONFIRMED` or `PENDING_PAYMENT`
    pub reservation_status: String,
}

impl ReservationResponse {
    pub fn from_domain(reservation_id: i64, reservation: &Reservation) -> Self {
        Self {
            reservation_id,
            reservation_status: reservation.status.to_string(),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

pub mod error;
pub mod notification;
pub mod reservation;

// Re-export commonly used types
pub use error::{DomainError, DomainResult};
pub use notification::{extract_reservation_reference, PAYMENT_REFERENCE_LEN};
pub use reservation::{
    validate_reservation_period, PaymentMode, Reservation, ReservationRepository,
    ReservationStatus, RoomSegment,
};

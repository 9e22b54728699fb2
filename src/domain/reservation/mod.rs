//! Reservation aggregate
//!
//! Contains the Reservation entity, related types, and repository interface.

pub mod model;
pub mod repository;

pub use model::{
    validate_reservation_period, PaymentMode, Reservation, ReservationStatus, RoomSegment,
    MAX_STAY_DAYS, MIN_STAY_DAYS,
};
pub use repository::ReservationRepository;

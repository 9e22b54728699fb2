//! Application layer: lifecycle services, outbound ports and background tasks

pub mod ports;
pub mod services;

pub use ports::CardPaymentVerifier;
pub use services::{CreateReservation, ReservationService};

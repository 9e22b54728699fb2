//! API data transfer objects

pub mod common;
pub mod reservation;

pub use common::ApiResponse;
pub use reservation::{ReservationRequest, ReservationResponse};

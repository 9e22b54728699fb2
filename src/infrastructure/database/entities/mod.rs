//! Database entities

pub mod reservation;

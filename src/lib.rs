//! # Room Reservation Service
//!
//! Manages room reservations whose confirmation depends on the payment mode:
//! immediate for cash, synchronously verified against the card-payment
//! service for credit card, and deferred pending an asynchronous
//! bank-transfer notification otherwise.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Reservation entity, status machine, repository trait
//! - **application**: Lifecycle service, outbound ports, overdue sweep task
//! - **infrastructure**: SeaORM persistence, Kafka listener, payment client
//! - **api**: REST API with Swagger documentation
//! - **shared**: Graceful shutdown coordination

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmReservationRepository};

// Re-export API router
pub use api::create_api_router;

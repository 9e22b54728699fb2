//! Infrastructure layer: persistence, messaging and external services

pub mod database;
pub mod messaging;
pub mod payment;
pub mod storage;

pub use database::{init_database, DatabaseConfig, SeaOrmReservationRepository};
pub use messaging::start_payment_update_listener;
pub use payment::HttpCardPaymentVerifier;
pub use storage::InMemoryReservationRepository;

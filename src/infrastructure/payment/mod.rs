//! Outbound payment integrations

pub mod card_client;

pub use card_client::HttpCardPaymentVerifier;

//! Inbound message-queue integrations

pub mod payment_update_listener;

pub use payment_update_listener::{
    start_payment_update_listener, PaymentUpdate, PAYMENT_UPDATE_GROUP, PAYMENT_UPDATE_TOPIC,
};

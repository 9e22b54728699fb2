pub mod outbound;

pub use outbound::CardPaymentVerifier;

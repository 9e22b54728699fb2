//! Kafka listener for bank-transfer payment updates
//!
//! Consumes JSON `PaymentUpdate` messages and forwards the transaction
//! description to the reservation lifecycle. Commits are manual so delivery
//! is at-least-once; the confirmation path is idempotent, which makes
//! redelivery safe.

use std::sync::Arc;

use rdkafka::config::ClientConfig;
use rdkafka::consumer::{CommitMode, Consumer, StreamConsumer};
use rdkafka::message::Message;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::application::services::ReservationService;
use crate::domain::DomainError;
use crate::shared::shutdown::ShutdownSignal;

pub const PAYMENT_UPDATE_TOPIC: &str = "bank-transfer-payment-update";
pub const PAYMENT_UPDATE_GROUP: &str = "room-reservation-group";

/// Inbound bank-transfer payment update.
///
/// Only the transaction description is consumed by the lifecycle; the other
/// fields travel along for auditing by the payments team.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentUpdate {
    pub payment_id: String,
    pub debtor_account_number: String,
    pub amount_received: Decimal,
    pub transaction_description: String,
}

/// What to do with a processed message offset.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum MessageDisposition {
    /// Commit the offset; the message must not be redelivered.
    Consume,
    /// Leave the offset uncommitted so the broker redelivers.
    Redeliver,
}

pub(crate) async fn process_payload(
    service: &ReservationService,
    payload: &[u8],
) -> MessageDisposition {
    let update: PaymentUpdate = match serde_json::from_slice(payload) {
        Ok(update) => update,
        Err(e) => {
            error!(error = %e, "error processing payment update message");
            return MessageDisposition::Consume;
        }
    };

    match service
        .confirm_bank_transfer_payment(&update.transaction_description)
        .await
    {
        Ok(()) => MessageDisposition::Consume,
        Err(e @ DomainError::Validation(_)) => {
            // A malformed description never becomes valid; consume it
            // instead of looping it through the broker forever.
            error!(payment_id = %update.payment_id, error = %e, "rejected payment update");
            MessageDisposition::Consume
        }
        Err(e) => {
            warn!(
                payment_id = %update.payment_id,
                error = %e,
                "failed to apply payment update, message will be redelivered"
            );
            MessageDisposition::Redeliver
        }
    }
}

/// Start the payment-update consumer loop.
pub fn start_payment_update_listener(
    service: Arc<ReservationService>,
    shutdown: ShutdownSignal,
    brokers: String,
    topic: String,
    group_id: String,
) {
    tokio::spawn(async move {
        let consumer: StreamConsumer = match ClientConfig::new()
            .set("bootstrap.servers", &brokers)
            .set("group.id", &group_id)
            .set("enable.auto.commit", "false")
            .set("auto.offset.reset", "earliest")
            .set("session.timeout.ms", "6000")
            .create()
        {
            Ok(consumer) => consumer,
            Err(e) => {
                error!(error = %e, brokers, "failed to create payment update consumer");
                return;
            }
        };

        if let Err(e) = consumer.subscribe(&[topic.as_str()]) {
            error!(error = %e, topic, "failed to subscribe to payment update topic");
            return;
        }

        info!(topic, group = group_id, "payment update listener started");

        use futures_util::StreamExt;
        let mut stream = consumer.stream();

        loop {
            tokio::select! {
                message = stream.next() => match message {
                    Some(Ok(message)) => {
                        let payload = message.payload().unwrap_or_default();
                        if process_payload(&service, payload).await == MessageDisposition::Consume {
                            if let Err(e) = consumer.commit_message(&message, CommitMode::Async) {
                                warn!(error = %e, "failed to commit payment update offset");
                            }
                        }
                    }
                    Some(Err(e)) => {
                        warn!(error = %e, "kafka error while consuming payment updates");
                    }
                    None => break,
                },
                _ = shutdown.notified().wait() => {
                    info!("payment update listener shutting down");
                    break;
                }
            }
        }

        info!("payment update listener stopped");
    });
}

// ── Tests ──────────────────────────────────────────────────────

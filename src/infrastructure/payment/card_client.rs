//! HTTP client for the external card-payment service
//!
//! The service answers a payment-status query with
//! `{"status": "CONFIRMED"}` (or any other status string) for a given
//! payment reference. Every transport or protocol failure is reported as
//! "not confirmed" to the lifecycle; this client never invents a success.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::application::ports::CardPaymentVerifier;

const CONFIRMED_STATUS: &str = "CONFIRMED";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Serialize)]
struct CardPaymentStatusRequest<'a> {
    payment_reference: &'a str,
}

#[derive(Debug, Deserialize)]
struct CardPaymentStatusResponse {
    status: String,
}

/// Card-payment verifier backed by the payment provider's REST endpoint
pub struct HttpCardPaymentVerifier {
    client: reqwest::Client,
    payment_status_url: String,
}

impl HttpCardPaymentVerifier {
    pub fn new(payment_status_url: impl Into<String>) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            payment_status_url: payment_status_url.into(),
        })
    }

    async fn query_status(&self, payment_reference: &str) -> reqwest::Result<String> {
        let response = self
            .client
            .post(&self.payment_status_url)
            .json(&CardPaymentStatusRequest { payment_reference })
            .send()
            .await?
            .error_for_status()?
            .json::<CardPaymentStatusResponse>()
            .await?;
        Ok(response.status)
    }
}

#[async_trait]
impl CardPaymentVerifier for HttpCardPaymentVerifier {
    async fn is_confirmed(&self, payment_reference: &str) -> bool {
        match self.query_status(payment_reference).await {
            Ok(status) => status.eq_ignore_ascii_case(CONFIRMED_STATUS),
            Err(e) => {
                warn!(error = %e, "error calling credit card payment service");
                false
            }
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

//! Payment provider seam.
//!
//! [`StripeGateway`] talks to the provider's REST API directly with
//! `reqwest`; tests substitute their own [`PaymentGateway`].

use anyhow::anyhow;
use async_trait::async_trait;
use serde::Deserialize;
use stayvista_config::PaymentConfig;
use stayvista_core::AppError;
use std::fmt;
use std::time::Instant;
use tracing::Instrument;

use crate::external_http_span;
use crate::metrics::track_payment_provider_duration;
use crate::utils::tracing::{record_error, record_http_status};

/// A created payment intent. Only the client secret leaves the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync + fmt::Debug {
    /// Creates a card payment intent for `amount` in the smallest currency unit.
    async fn create_payment_intent(&self, amount: i64) -> Result<PaymentIntent, AppError>;
}

#[derive(Clone)]
pub struct StripeGateway {
    client: reqwest::Client,
    secret_key: String,
    api_base: String,
    currency: String,
}

impl StripeGateway {
    pub fn new(config: &PaymentConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(AppError::internal)?;

        Ok(Self {
            client,
            secret_key: config.stripe_secret_key.clone(),
            api_base: config.stripe_api_base.trim_end_matches('/').to_string(),
            currency: config.currency.clone(),
        })
    }

    async fn call_api(&self, amount: i64) -> anyhow::Result<PaymentIntent> {
        let amount = amount.to_string();
        let response = self
            .client
            .post(format!("{}/v1/payment_intents", self.api_base))
            .bearer_auth(&self.secret_key)
            .form(&[
                ("amount", amount.as_str()),
                ("currency", self.currency.as_str()),
                ("payment_method_types[]", "card"),
            ])
            .send()
            .await?;

        let status = response.status();
        record_http_status(status.as_u16());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Stripe API error {}: {}", status, body));
        }

        #[derive(Deserialize)]
        struct ApiResponse {
            id: String,
            client_secret: String,
        }

        let intent: ApiResponse = response.json().await?;
        Ok(PaymentIntent {
            id: intent.id,
            client_secret: intent.client_secret,
        })
    }
}

impl fmt::Debug for StripeGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StripeGateway")
            .field("api_base", &self.api_base)
            .field("currency", &self.currency)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_payment_intent(&self, amount: i64) -> Result<PaymentIntent, AppError> {
        let span = external_http_span!("stripe", "POST", "/v1/payment_intents");
        let start = Instant::now();

        let result = async {
            self.call_api(amount).await.map_err(|e| {
                record_error(&e.to_string());
                AppError::bad_gateway(e)
            })
        }
        .instrument(span)
        .await;

        track_payment_provider_duration(start.elapsed());
        result
    }
}

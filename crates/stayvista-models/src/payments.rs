//! Payment-intent request and response bodies.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PaymentIntentRequest {
    /// Price in major currency units (e.g. dollars).
    pub price: Option<f64>,
}

impl PaymentIntentRequest {
    /// Price converted to the smallest currency unit, rounded to the nearest cent.
    ///
    /// Returns `None` when the price is missing, not finite, or under one cent.
    pub fn amount_in_cents(&self) -> Option<i64> {
        let price = self.price?;
        if !price.is_finite() {
            return None;
        }
        let cents = (price * 100.0).round();
        if cents < 1.0 || cents > i64::MAX as f64 {
            return None;
        }
        Some(cents as i64)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}

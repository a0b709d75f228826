use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct PaymentConfig {
    pub stripe_secret_key: String,
    pub stripe_api_base: String,
    pub currency: String,
    pub request_timeout: Duration,
}

impl PaymentConfig {
    pub fn from_env() -> Self {
        Self {
            stripe_secret_key: env::var("STRIPE_SECRET_KEY").unwrap_or_default(),
            stripe_api_base: env::var("STRIPE_API_BASE")
                .unwrap_or_else(|_| "https://api.stripe.com".to_string()),
            currency: env::var("PAYMENT_CURRENCY").unwrap_or_else(|_| "usd".to_string()),
            request_timeout: env::var("STRIPE_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(Duration::from_secs(10)),
        }
    }
}

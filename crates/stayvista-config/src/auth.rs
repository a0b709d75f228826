use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// Upper bound on the user-record lookup performed by role gates.
    pub role_lookup_timeout: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            role_lookup_timeout: Duration::from_millis(5000),
        }
    }
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            role_lookup_timeout: env::var("ROLE_LOOKUP_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(Duration::from_millis(5000)),
        }
    }
}

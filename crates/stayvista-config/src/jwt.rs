use std::env;

/// Placeholder secret used when none is configured. Never acceptable in production.
pub const DEFAULT_SECRET: &str = "your-secret-key-change-in-production";

/// Default session lifetime: 24 hours.
pub const DEFAULT_SESSION_TTL_SECS: i64 = 86_400;

/// Longest session lifetime accepted from the environment: one year.
pub const MAX_SESSION_TTL_SECS: i64 = 365 * 86_400;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Session token lifetime in seconds.
    pub session_ttl_secs: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("ACCESS_TOKEN_SECRET")
                .or_else(|_| env::var("JWT_SECRET"))
                .unwrap_or_else(|_| DEFAULT_SECRET.to_string()),
            session_ttl_secs: parse_session_ttl(env::var("JWT_SESSION_TTL").ok().as_deref()),
        }
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

/// Unparseable or non-positive values fall back to the default; large ones
/// are capped at [`MAX_SESSION_TTL_SECS`].
fn parse_session_ttl(raw: Option<&str>) -> i64 {
    match raw.and_then(|s| s.trim().parse::<i64>().ok()) {
        Some(ttl) if ttl > 0 => ttl.min(MAX_SESSION_TTL_SECS),
        _ => DEFAULT_SESSION_TTL_SECS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_ttl_defaults_to_a_day() {
        assert_eq!(parse_session_ttl(None), 86_400);
        assert_eq!(parse_session_ttl(Some("soon")), 86_400);
        assert_eq!(parse_session_ttl(Some("-5")), 86_400);
    }

    #[test]
    fn test_session_ttl_is_capped() {
        assert_eq!(parse_session_ttl(Some("3600")), 3600);
        assert_eq!(
            parse_session_ttl(Some("9223372036854775807")),
            MAX_SESSION_TTL_SECS
        );
    }
}

//! Session token issuance and verification.
//!
//! Tokens are HS256 JWTs signed with the process-wide secret from
//! [`JwtConfig`]. Verification applies no clock leeway: a token is
//! rejected the second it expires.
//!
//! # Example
//!
//! ```ignore
//! use stayvista_auth::{Identity, issue_session_token, verify_session_token};
//! use stayvista_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = issue_session_token(&Identity::new("a@x.com"), &config)?;
//! let identity = verify_session_token(&token, &config)?;
//! assert_eq!(identity.email, "a@x.com");
//! ```

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use stayvista_config::JwtConfig;
use stayvista_core::AppError;

use crate::claims::{Identity, SessionClaims};
use crate::error::AuthError;

/// Signs `identity` into a session token valid for `session_ttl_secs`.
///
/// Each call stamps a fresh `iat`/`exp`, so two tokens for the same identity
/// differ once a second has passed.
///
/// # Errors
///
/// Returns an internal error if the lifetime overflows the expiry timestamp
/// or encoding fails.
pub fn issue_session_token(identity: &Identity, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp().max(0);
    let exp = now
        .checked_add(jwt_config.session_ttl_secs.max(0))
        .and_then(|exp| usize::try_from(exp).ok())
        .ok_or_else(|| {
            AppError::internal_error(format!(
                "Session lifetime of {}s overflows the expiry timestamp",
                jwt_config.session_ttl_secs
            ))
        })?;

    let claims = SessionClaims {
        identity: identity.without_reserved_claims(),
        iat: now as usize,
        exp,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create session token: {}", e)))
}

/// Decodes a session token and returns the signed identity.
///
/// # Errors
///
/// Returns [`AuthError::Unauthenticated`] if the token is malformed, expired,
/// signed with another secret or another algorithm, or lacks an email.
pub fn verify_session_token(token: &str, jwt_config: &JwtConfig) -> Result<Identity, AuthError> {
    decode_session_claims(token, jwt_config).map(|claims| claims.identity)
}

/// Like [`verify_session_token`] but keeps the timestamps.
pub fn decode_session_claims(
    token: &str,
    jwt_config: &JwtConfig,
) -> Result<SessionClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!(error = %e, "Session token rejected");
        AuthError::Unauthenticated
    })
}

//! Failure kinds of the request gate.
//!
//! Authentication and authorization failures both answer 401 for wire
//! compatibility with existing clients, but stay distinct variants so they
//! can be logged and counted separately. A failing user directory is never
//! reported as a denial.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// No session token, or one that is malformed, expired or wrongly signed.
    #[error("missing or invalid session token")]
    Unauthenticated,
    /// Valid identity without a user record holding the required role.
    #[error("identity lacks the required role")]
    Unauthorized,
    /// The user directory failed or did not answer in time.
    #[error("user directory unavailable: {0}")]
    UpstreamFailure(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Unauthenticated | AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
            AuthError::UpstreamFailure(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Fixed client-facing message. Never mentions whether an account exists.
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::Unauthenticated => "unauthorized access",
            AuthError::Unauthorized => "Unauthorized",
            AuthError::UpstreamFailure(_) => "service temporarily unavailable",
        }
    }

    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::Unauthenticated => "unauthenticated",
            AuthError::Unauthorized => "unauthorized",
            AuthError::UpstreamFailure(_) => "upstream_failure",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.public_message() }));
        (self.status_code(), body).into_response()
    }
}

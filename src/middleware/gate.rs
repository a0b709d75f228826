//! Ordered request gates.
//!
//! Every gated route runs the same chain: verify the session token, then
//! (for role gates) check the caller's current role in the user directory.
//! The first failing step ends the request with that step's error response;
//! the handler never runs.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use stayvista_auth::{AuthError, Identity};
use stayvista_models::Role;
use std::time::Instant;
use tracing::Instrument;

use crate::metrics::{track_gate_decision, track_gate_duration};
use crate::middleware::auth::authenticate;
use crate::state::AppState;
use crate::{auth_span, security_event};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Any valid session.
    Session,
    /// A valid session whose user record currently holds exactly this role.
    Role(Role),
}

impl Gate {
    pub fn label(&self) -> &'static str {
        match self {
            Gate::Session => "session",
            Gate::Role(role) => role.as_str(),
        }
    }
}

/// Runs `gate` against the request headers and returns the verified identity.
pub async fn check(state: &AppState, gate: Gate, headers: &HeaderMap) -> Result<Identity, AuthError> {
    let identity = authenticate(headers, state)?;

    if let Gate::Role(required) = gate {
        state.authorizer.authorize(&identity, required).await?;
    }

    Ok(identity)
}

async fn run_gate(state: AppState, gate: Gate, mut req: Request, next: Next) -> Response {
    let span = auth_span!("gate", auth.gate = gate.label());
    let start = Instant::now();
    let decision = check(&state, gate, req.headers())
        .instrument(span.clone())
        .await;
    track_gate_duration(gate.label(), start.elapsed());
    span.record("auth.success", decision.is_ok());

    match decision {
        Ok(identity) => {
            span.record("user.email", identity.email.as_str());
            track_gate_decision(gate.label(), "allowed");
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        Err(err) => {
            security_event!(
                "gate_rejected",
                gate = gate.label(),
                reason = err.kind(),
                method = %req.method(),
                path = %req.uri().path(),
                "Request rejected by gate"
            );
            track_gate_decision(gate.label(), err.kind());
            err.into_response()
        }
    }
}

/// Requires a valid session token.
pub async fn require_session(State(state): State<AppState>, req: Request, next: Next) -> Response {
    run_gate(state, Gate::Session, req, next).await
}

/// Requires a valid session whose user currently has the `host` role.
pub async fn require_host(State(state): State<AppState>, req: Request, next: Next) -> Response {
    run_gate(state, Gate::Role(Role::Host), req, next).await
}

/// Requires a valid session whose user currently has the `admin` role.
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    run_gate(state, Gate::Role(Role::Admin), req, next).await
}

//! Span and event helpers shared by the request gate and the outbound
//! collaborators (payment provider, mail relay).

use tracing::Span;

/// Span around a gate decision.
///
/// # Example
/// ```ignore
/// let span = auth_span!("gate", auth.gate = "host");
/// ```
#[macro_export]
macro_rules! auth_span {
    ($event:expr) => {
        tracing::info_span!(
            "auth",
            auth.event = $event,
            auth.success = tracing::field::Empty,
            user.email = tracing::field::Empty
        )
    };
    ($event:expr, $($field:tt)*) => {
        tracing::info_span!(
            "auth",
            auth.event = $event,
            auth.success = tracing::field::Empty,
            user.email = tracing::field::Empty,
            $($field)*
        )
    };
}

/// Span around a call to a third-party HTTP service.
#[macro_export]
macro_rules! external_http_span {
    ($service:expr, $method:expr, $path:expr) => {
        tracing::info_span!(
            "http.client",
            service.name = $service,
            http.method = $method,
            http.url = $path,
            http.status_code = tracing::field::Empty,
            error.message = tracing::field::Empty
        )
    };
}

/// Log a security-relevant event at WARN level
#[macro_export]
macro_rules! security_event {
    ($event:expr, $($field:tt)*) => {
        tracing::warn!(
            security.event = $event,
            $($field)*
        )
    };
}

/// Log an audit event at INFO level
#[macro_export]
macro_rules! audit_event {
    ($action:expr, $resource:expr, $($field:tt)*) => {
        tracing::info!(
            audit.action = $action,
            audit.resource = $resource,
            $($field)*
        )
    };
}

/// Record a failed operation on the current span with an error message
pub fn record_error(message: &str) {
    Span::current().record("error.message", message);
}

/// Record the upstream HTTP status on the current span
pub fn record_http_status(status: u16) {
    Span::current().record("http.status_code", status);
}

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::{Duration, Instant};
use tracing::warn;

use crate::logging::status_class;

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

/// Check if observability is enabled via OBSERVABILITY_ENABLED env var
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true)
    })
}

/// Latency buckets (seconds) for every `*_duration_seconds` histogram: HTTP
/// requests, gate decisions and payment-provider calls.
const LATENCY_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Installs the Prometheus recorder and spawns its upkeep task.
///
/// Returns `None` when observability is disabled or the recorder cannot be
/// installed; the API keeps serving either way.
pub fn init_metrics() -> Option<PrometheusHandle> {
    if !is_observability_enabled() {
        return None;
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Suffix("_duration_seconds".to_string()),
            LATENCY_BUCKETS,
        )
        .and_then(|builder| builder.install_recorder());

    let handle = match handle {
        Ok(handle) => handle,
        Err(e) => {
            warn!(error = %e, "Failed to install Prometheus recorder, metrics disabled");
            return None;
        }
    };

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(5));
        loop {
            interval.tick().await;
            upkeep_handle.run_upkeep();
        }
    });

    Some(handle)
}

/// Route template for the `path` label. Unrouted paths share one label so
/// scanners cannot grow the series count.
fn route_label(req: &Request) -> String {
    req.extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned())
}

/// Counts and times every request by method, route template and status class.
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = route_label(&req);

    gauge!("http_requests_active").increment(1.0);
    let response = next.run(req).await;
    gauge!("http_requests_active").decrement(1.0);

    let class = status_class(response.status());
    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status_class" => class
    )
    .increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path)
        .record(start.elapsed().as_secs_f64());

    response
}

/// Router for metrics server
pub fn metrics_app(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

// Business metrics helpers

/// Records one request gate decision. `outcome` is `allowed` or the
/// rejection kind (`unauthenticated`, `unauthorized`, `upstream_failure`).
pub fn track_gate_decision(gate: &'static str, outcome: &'static str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("auth_gate_decisions_total", "gate" => gate, "outcome" => outcome).increment(1);
}

/// Time spent deciding one gate, role lookup included.
pub fn track_gate_duration(gate: &'static str, elapsed: Duration) {
    if !is_observability_enabled() {
        return;
    }
    histogram!("auth_gate_duration_seconds", "gate" => gate).record(elapsed.as_secs_f64());
}

pub fn track_session_issued() {
    if !is_observability_enabled() {
        return;
    }
    counter!("session_tokens_issued_total").increment(1);
}

pub fn track_user_created(role: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("users_created_total", "role" => role.to_string()).increment(1);
}

pub fn track_role_change(role: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("user_role_changes_total", "role" => role.to_string()).increment(1);
}

pub fn track_room_created() {
    if !is_observability_enabled() {
        return;
    }
    counter!("rooms_created_total").increment(1);
}

pub fn track_booking_created() {
    if !is_observability_enabled() {
        return;
    }
    counter!("bookings_created_total").increment(1);
}

pub fn track_payment_intent(success: bool) {
    if !is_observability_enabled() {
        return;
    }
    let status = if success { "success" } else { "error" };
    counter!("payment_intents_total", "status" => status).increment(1);
}

pub fn track_payment_provider_duration(elapsed: Duration) {
    if !is_observability_enabled() {
        return;
    }
    histogram!("payment_provider_duration_seconds").record(elapsed.as_secs_f64());
}

pub fn track_email_sent(success: bool) {
    if !is_observability_enabled() {
        return;
    }
    let status = if success { "sent" } else { "failed" };
    counter!("emails_total", "status" => status).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_unrouted_paths_share_a_label() {
        let req = axum::http::Request::builder()
            .uri("/wp-admin/setup.php")
            .body(Body::empty())
            .unwrap();
        assert_eq!(route_label(&req), "unmatched");
    }

    #[test]
    fn test_latency_buckets_are_sorted() {
        assert!(LATENCY_BUCKETS.windows(2).all(|pair| pair[0] < pair[1]));
    }
}

use crate::middleware::gate::require_session;
use crate::modules::payments::controller::create_payment_intent;
use crate::state::AppState;
use axum::{Router, middleware, routing::post};

pub fn init_payments_router(state: &AppState) -> Router<AppState> {
    Router::new().route(
        "/create-payment-intent",
        post(create_payment_intent)
            .route_layer(middleware::from_fn_with_state(state.clone(), require_session)),
    )
}

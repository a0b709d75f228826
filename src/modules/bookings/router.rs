use crate::middleware::gate::{require_host, require_session};
use crate::modules::bookings::controller::{
    create_booking, get_guest_bookings, get_host_bookings,
};
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{get, post},
};

pub fn init_bookings_router(state: &AppState) -> Router<AppState> {
    let session = middleware::from_fn_with_state(state.clone(), require_session);
    let host = middleware::from_fn_with_state(state.clone(), require_host);

    Router::new()
        .route(
            "/bookings",
            get(get_guest_bookings)
                .merge(post(create_booking))
                .route_layer(session),
        )
        .route("/bookings/host", get(get_host_bookings).route_layer(host))
}

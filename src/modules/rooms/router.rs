use crate::middleware::gate::{require_host, require_session};
use crate::modules::rooms::controller::{
    add_room, get_host_rooms, get_room, get_rooms, update_room_status,
};
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

pub fn init_rooms_router(state: &AppState) -> Router<AppState> {
    let session = middleware::from_fn_with_state(state.clone(), require_session);
    let host = middleware::from_fn_with_state(state.clone(), require_host);

    Router::new()
        .route(
            "/rooms",
            get(get_rooms)
                .route_layer(session.clone())
                .merge(post(add_room).route_layer(host.clone())),
        )
        .route("/rooms/{email}", get(get_host_rooms).route_layer(host))
        .route("/room/{id}", get(get_room))
        .route(
            "/rooms/status/{id}",
            patch(update_room_status).route_layer(session),
        )
}

use crate::middleware::gate::{require_admin, require_session};
use crate::modules::users::controller::{get_user, get_users, save_user, update_user_role};
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{get, put},
};

pub fn init_users_router(state: &AppState) -> Router<AppState> {
    let session = middleware::from_fn_with_state(state.clone(), require_session);
    let admin = middleware::from_fn_with_state(state.clone(), require_admin);

    Router::new()
        .route("/users", get(get_users).route_layer(admin.clone()))
        .route("/users/{email}", put(save_user))
        .route("/users/update/{email}", put(update_user_role).route_layer(admin))
        .route("/user/{email}", get(get_user).route_layer(session))
}

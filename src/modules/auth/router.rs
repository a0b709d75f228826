use crate::modules::auth::controller::{issue_token, logout};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/jwt", post(issue_token))
        .route("/logout", get(logout))
}

use crate::docs::ErrorResponse;
use crate::metrics::track_session_issued;
use crate::middleware::auth::{cleared_session_cookie, session_cookie};
use crate::state::AppState;
use crate::validator::ValidatedJson;
use axum::{Json, extract::State};
use axum_extra::extract::cookie::CookieJar;
use stayvista_auth::{Identity, issue_session_token};
use stayvista_core::AppError;
use stayvista_models::SuccessResponse;
use tracing::{info, instrument};

/// Issue a session token for the signed-in user
///
/// The token travels in an HttpOnly `token` cookie; the body only reports success.
#[utoipa::path(
    post,
    path = "/jwt",
    responses(
        (status = 200, description = "Session cookie set", body = SuccessResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 422, description = "Missing email", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar))]
pub async fn issue_token(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(identity): ValidatedJson<Identity>,
) -> Result<(CookieJar, Json<SuccessResponse>), AppError> {
    let token = issue_session_token(&identity, &state.jwt_config)?;

    track_session_issued();
    info!(user.email = %identity.email, "Session token issued");

    Ok((
        jar.add(session_cookie(&state.session_config, token)),
        Json(SuccessResponse { success: true }),
    ))
}

/// Clear the session cookie
#[utoipa::path(
    get,
    path = "/logout",
    responses(
        (status = 200, description = "Session cookie cleared", body = SuccessResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar))]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<SuccessResponse>) {
    (
        jar.add(cleared_session_cookie(&state.session_config)),
        Json(SuccessResponse { success: true }),
    )
}

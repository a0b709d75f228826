use crate::docs::ErrorResponse;
use crate::metrics::track_booking_created;
use crate::modules::bookings::service::BookingService;
use crate::state::AppState;
use crate::utils::email::notify_booking_parties;
use crate::validator::ValidatedJson;
use axum::{
    Json,
    extract::{Query, State},
};
use stayvista_core::AppError;
use stayvista_models::{Booking, BookingQuery, InsertResult, NewBooking};
use tracing::{info, instrument};

/// Record a booking and notify guest and host
#[utoipa::path(
    post,
    path = "/bookings",
    responses(
        (status = 200, description = "Insert acknowledgement", body = InsertResult),
        (status = 401, description = "No valid session", body = ErrorResponse),
        (status = 422, description = "Invalid booking document", body = ErrorResponse)
    ),
    security(("session_cookie" = [])),
    tag = "Bookings"
)]
#[instrument(skip(state, booking))]
pub async fn create_booking(
    State(state): State<AppState>,
    ValidatedJson(booking): ValidatedJson<NewBooking>,
) -> Result<Json<InsertResult>, AppError> {
    let id = BookingService::create_booking(&state.db, &booking).await?;

    track_booking_created();
    info!(booking.id = %id, "Booking created");

    notify_booking_parties(
        state.mailer.clone(),
        booking.guest.email,
        booking.host,
        booking.transaction_id,
    );

    Ok(Json(InsertResult::new(id)))
}

/// List a guest's bookings
#[utoipa::path(
    get,
    path = "/bookings",
    params(("email" = Option<String>, Query, description = "Guest email; omitted yields an empty list")),
    responses(
        (status = 200, description = "Booking documents"),
        (status = 401, description = "No valid session", body = ErrorResponse)
    ),
    security(("session_cookie" = [])),
    tag = "Bookings"
)]
#[instrument(skip(state))]
pub async fn get_guest_bookings(
    State(state): State<AppState>,
    Query(query): Query<BookingQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let Some(email) = query.email.filter(|e| !e.is_empty()) else {
        return Ok(Json(Vec::new()));
    };

    let bookings = BookingService::get_guest_bookings(&state.db, &email).await?;
    Ok(Json(bookings))
}

/// List the bookings made on a host's rooms
#[utoipa::path(
    get,
    path = "/bookings/host",
    params(("email" = Option<String>, Query, description = "Host email; omitted yields an empty list")),
    responses(
        (status = 200, description = "Booking documents"),
        (status = 401, description = "No valid session, or caller is not a host", body = ErrorResponse),
        (status = 503, description = "Role lookup unavailable", body = ErrorResponse)
    ),
    security(("session_cookie" = [])),
    tag = "Bookings"
)]
#[instrument(skip(state))]
pub async fn get_host_bookings(
    State(state): State<AppState>,
    Query(query): Query<BookingQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let Some(email) = query.email.filter(|e| !e.is_empty()) else {
        return Ok(Json(Vec::new()));
    };

    let bookings = BookingService::get_host_bookings(&state.db, &email).await?;
    Ok(Json(bookings))
}

use crate::docs::ErrorResponse;
use crate::metrics::track_payment_intent;
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;
use anyhow::anyhow;
use axum::{Json, extract::State};
use stayvista_core::AppError;
use stayvista_models::{PaymentIntentRequest, PaymentIntentResponse};
use tracing::{info, instrument};

/// Create a card payment intent for a booking price
#[utoipa::path(
    post,
    path = "/create-payment-intent",
    request_body = PaymentIntentRequest,
    responses(
        (status = 200, description = "Payment intent created", body = PaymentIntentResponse),
        (status = 400, description = "Missing or non-positive price", body = ErrorResponse),
        (status = 401, description = "No valid session", body = ErrorResponse),
        (status = 502, description = "Payment provider error", body = ErrorResponse)
    ),
    security(
        ("session_cookie" = [])
    ),
    tag = "Payments"
)]
#[instrument(skip(state))]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(dto): Json<PaymentIntentRequest>,
) -> Result<Json<PaymentIntentResponse>, AppError> {
    let amount = dto
        .amount_in_cents()
        .ok_or_else(|| AppError::bad_request(anyhow!("price must be a positive amount")))?;

    let intent = state
        .payments
        .create_payment_intent(amount)
        .await
        .inspect_err(|_| track_payment_intent(false))?;

    track_payment_intent(true);
    info!(user.email = %user.email(), intent.id = %intent.id, amount, "Payment intent created");

    Ok(Json(PaymentIntentResponse {
        client_secret: intent.client_secret,
    }))
}

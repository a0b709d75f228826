use anyhow::Context;
use sqlx::PgPool;
use sqlx::types::Json;
use stayvista_core::AppError;
use tracing::instrument;
use stayvista_models::{Booking, BookingRow, NewBooking};
use uuid::Uuid;

pub struct BookingService;

impl BookingService {
    #[instrument(skip(db, booking))]
    pub async fn create_booking(db: &PgPool, booking: &NewBooking) -> Result<Uuid, AppError> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO bookings (guest_email, host_email, transaction_id, doc)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&booking.guest.email)
        .bind(&booking.host)
        .bind(booking.transaction_id.as_deref())
        .bind(Json(booking.to_document()))
        .fetch_one(db)
        .await
        .context("Failed to insert booking")
        .map_err(AppError::database)?;

        Ok(id)
    }

    #[instrument(skip(db))]
    pub async fn get_guest_bookings(db: &PgPool, guest_email: &str) -> Result<Vec<Booking>, AppError> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, guest_email, host_email, transaction_id, doc, created_at
            FROM bookings
            WHERE guest_email = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(guest_email)
        .fetch_all(db)
        .await
        .context("Failed to fetch guest bookings")
        .map_err(AppError::database)?;

        Ok(rows.into_iter().map(Booking::from).collect())
    }

    #[instrument(skip(db))]
    pub async fn get_host_bookings(db: &PgPool, host_email: &str) -> Result<Vec<Booking>, AppError> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, guest_email, host_email, transaction_id, doc, created_at
            FROM bookings
            WHERE host_email = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(host_email)
        .fetch_all(db)
        .await
        .context("Failed to fetch host bookings")
        .map_err(AppError::database)?;

        Ok(rows.into_iter().map(Booking::from).collect())
    }
}

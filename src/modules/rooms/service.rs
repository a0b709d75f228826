use anyhow::Context;
use sqlx::PgPool;
use sqlx::types::Json;
use stayvista_core::AppError;
use tracing::instrument;
use stayvista_models::{NewRoom, Room, RoomRow, WriteResult};
use uuid::Uuid;

pub struct RoomService;

impl RoomService {
    #[instrument(skip(db))]
    pub async fn get_rooms(db: &PgPool) -> Result<Vec<Room>, AppError> {
        let rows = sqlx::query_as::<_, RoomRow>(
            r#"
            SELECT id, host_email, booked, doc, created_at
            FROM rooms
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(db)
        .await
        .context("Failed to fetch rooms")
        .map_err(AppError::database)?;

        Ok(rows.into_iter().map(Room::from).collect())
    }

    #[instrument(skip(db))]
    pub async fn get_rooms_by_host(db: &PgPool, host_email: &str) -> Result<Vec<Room>, AppError> {
        let rows = sqlx::query_as::<_, RoomRow>(
            r#"
            SELECT id, host_email, booked, doc, created_at
            FROM rooms
            WHERE host_email = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(host_email)
        .fetch_all(db)
        .await
        .context("Failed to fetch host rooms")
        .map_err(AppError::database)?;

        Ok(rows.into_iter().map(Room::from).collect())
    }

    #[instrument(skip(db))]
    pub async fn get_room(db: &PgPool, id: Uuid) -> Result<Option<Room>, AppError> {
        let row = sqlx::query_as::<_, RoomRow>(
            r#"
            SELECT id, host_email, booked, doc, created_at
            FROM rooms
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch room")
        .map_err(AppError::database)?;

        Ok(row.map(Room::from))
    }

    #[instrument(skip(db, room))]
    pub async fn create_room(db: &PgPool, room: NewRoom) -> Result<Uuid, AppError> {
        let (host_email, booked, document) = room.into_parts();

        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO rooms (host_email, booked, doc)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(host_email)
        .bind(booked)
        .bind(Json(document))
        .fetch_one(db)
        .await
        .context("Failed to insert room")
        .map_err(AppError::database)?;

        Ok(id)
    }

    #[instrument(skip(db))]
    pub async fn set_booked(db: &PgPool, id: Uuid, booked: bool) -> Result<WriteResult, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE rooms
            SET booked = $2
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(booked)
        .execute(db)
        .await
        .context("Failed to update room status")
        .map_err(AppError::database)?;

        Ok(WriteResult::updated(result.rows_affected()))
    }
}

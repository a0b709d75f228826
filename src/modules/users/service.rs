use anyhow::Context;
use chrono::Utc;
use sqlx::PgPool;
use sqlx::types::Json;
use stayvista_core::AppError;
use tracing::instrument;
use stayvista_models::{
    Role, SaveUserResponse, UpdateUserRoleDto, UpsertUserDto, UserRecord, UserRow, WriteResult,
};

pub struct UserService;

/// Reads one user row by email.
pub(crate) async fn fetch_user(db: &PgPool, email: &str) -> Result<Option<UserRecord>, sqlx::Error> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT email, role, status, "timestamp", profile
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(db)
    .await?;

    Ok(row.map(UserRecord::from))
}

impl UserService {
    #[instrument(skip(db))]
    pub async fn get_user(db: &PgPool, email: &str) -> Result<Option<UserRecord>, AppError> {
        fetch_user(db, email)
            .await
            .context("Failed to fetch user")
            .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_users(db: &PgPool) -> Result<Vec<UserRecord>, AppError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT email, role, status, "timestamp", profile
            FROM users
            ORDER BY "timestamp" DESC NULLS LAST, email
            "#,
        )
        .fetch_all(db)
        .await
        .context("Failed to fetch users")
        .map_err(AppError::database)?;

        Ok(rows.into_iter().map(UserRecord::from).collect())
    }

    /// First-login upsert.
    ///
    /// A new email is stored with role `guest`. An existing user is only
    /// touched when asking to become a host; otherwise the call reports that
    /// the user exists. The body never changes a role.
    #[instrument(skip(db, dto))]
    pub async fn save_user(
        db: &PgPool,
        email: &str,
        dto: UpsertUserDto,
    ) -> Result<SaveUserResponse, AppError> {
        let existing = Self::get_user(db, email).await?;
        let is_host_request = dto.is_host_request();
        let status = dto.status.clone();
        let profile = dto.into_profile();

        if existing.is_some() {
            if !is_host_request {
                return Ok(SaveUserResponse::exists());
            }

            let result = sqlx::query(
                r#"
                UPDATE users
                SET status = $2, profile = profile || $3
                WHERE email = $1
                "#,
            )
            .bind(email)
            .bind(status)
            .bind(Json(profile))
            .execute(db)
            .await
            .context("Failed to update host request")
            .map_err(AppError::database)?;

            return Ok(SaveUserResponse::Written(WriteResult::updated(
                result.rows_affected(),
            )));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO users (email, role, status, "timestamp", profile)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(email)
        .bind(Role::Guest.as_str())
        .bind(status)
        .bind(Utc::now().timestamp_millis())
        .bind(Json(profile))
        .execute(db)
        .await
        .context("Failed to insert user")
        .map_err(AppError::database)?;

        // A concurrent first login won the insert.
        if result.rows_affected() == 0 {
            return Ok(SaveUserResponse::exists());
        }

        Ok(SaveUserResponse::Written(WriteResult::upserted(email)))
    }

    /// Admin role/status update. Creates the user when the email is unknown.
    #[instrument(skip(db))]
    pub async fn update_role(
        db: &PgPool,
        email: &str,
        dto: UpdateUserRoleDto,
    ) -> Result<WriteResult, AppError> {
        let inserted = sqlx::query_scalar::<_, bool>(
            r#"
            INSERT INTO users (email, role, status, "timestamp")
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO UPDATE
            SET role = COALESCE(EXCLUDED.role, users.role),
                status = COALESCE(EXCLUDED.status, users.status),
                "timestamp" = EXCLUDED."timestamp"
            RETURNING (xmax = 0)
            "#,
        )
        .bind(email)
        .bind(dto.role.map(|role| role.as_str()))
        .bind(dto.status)
        .bind(Utc::now().timestamp_millis())
        .fetch_one(db)
        .await
        .context("Failed to update user role")
        .map_err(AppError::database)?;

        Ok(if inserted {
            WriteResult::upserted(email)
        } else {
            WriteResult::updated(1)
        })
    }
}

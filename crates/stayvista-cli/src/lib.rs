//! # StayVista CLI
//!
//! Operator commands that act on the same store and token secret as the API:
//! promoting a user to a role and minting a session token for local testing.
//!
//! ## Usage
//!
//! ```ignore
//! use stayvista_cli::set_user_role;
//! use stayvista_models::Role;
//!
//! set_user_role(&pool, "host@example.com", Role::Host).await?;
//! ```

use anyhow::Context;
use chrono::Utc;
use sqlx::PgPool;
use stayvista_models::Role;

/// Outcome of [`set_user_role`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleChange {
    Created,
    Updated,
}

/// Creates or updates the user's role. A new user gets `status = "Verified"`.
pub async fn set_user_role(pool: &PgPool, email: &str, role: Role) -> anyhow::Result<RoleChange> {
    let inserted = sqlx::query_scalar::<_, bool>(
        r#"
        INSERT INTO users (email, role, status, "timestamp")
        VALUES ($1, $2, 'Verified', $3)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING (xmax = 0)
        "#,
    )
    .bind(email)
    .bind(role.as_str())
    .bind(Utc::now().timestamp_millis())
    .fetch_one(pool)
    .await
    .with_context(|| format!("Failed to set role for {email}"))?;

    Ok(if inserted {
        RoleChange::Created
    } else {
        RoleChange::Updated
    })
}

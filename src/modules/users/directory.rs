use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use stayvista_auth::UserDirectory;
use stayvista_models::UserRecord;

use crate::modules::users::service::fetch_user;

/// [`UserDirectory`] over the `users` table.
#[derive(Debug, Clone)]
pub struct PgUserDirectory {
    db: PgPool,
}

impl PgUserDirectory {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserRecord>> {
        fetch_user(&self.db, email)
            .await
            .context("Failed to look up user role")
    }
}

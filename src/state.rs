use anyhow::Context;
use sqlx::PgPool;
use std::sync::Arc;

use stayvista_auth::{RoleAuthorizer, UserDirectory};
use stayvista_config::{
    AuthConfig, CorsConfig, DatabaseConfig, EmailConfig, JwtConfig, PaymentConfig,
    SessionCookieConfig,
};
use stayvista_db::{init_db_pool, run_migrations};

use crate::modules::payments::gateway::{PaymentGateway, StripeGateway};
use crate::modules::users::directory::PgUserDirectory;
use crate::utils::email::{Mailer, mailer_from_config};

/// Shared collaborators, built once at startup and cloned into every request.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub authorizer: RoleAuthorizer,
    pub jwt_config: JwtConfig,
    pub session_config: SessionCookieConfig,
    pub cors_config: CorsConfig,
    pub mailer: Arc<dyn Mailer>,
    pub payments: Arc<dyn PaymentGateway>,
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let db_config = DatabaseConfig::from_env();
    let db = init_db_pool(&db_config)
        .await
        .context("Failed to connect to database")?;

    if db_config.run_migrations {
        run_migrations(&db)
            .await
            .context("Failed to run database migrations")?;
    }

    let auth_config = AuthConfig::from_env();
    let directory: Arc<dyn UserDirectory> = Arc::new(PgUserDirectory::new(db.clone()));
    let payments = StripeGateway::new(&PaymentConfig::from_env())
        .map_err(|e| e.error)
        .context("Failed to build payment client")?;

    Ok(AppState {
        db,
        authorizer: RoleAuthorizer::new(directory, auth_config.role_lookup_timeout),
        jwt_config: JwtConfig::from_env(),
        session_config: SessionCookieConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        mailer: mailer_from_config(EmailConfig::from_env()),
        payments: Arc::new(payments),
    })
}

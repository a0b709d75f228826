//! # StayVista DB
//!
//! PostgreSQL pool initialization and the embedded schema migrations.
//!
//! The pool is created once at startup, owned by the application state and
//! handed to every collaborator that needs it.
//!
//! # Example
//!
//! ```ignore
//! use stayvista_config::DatabaseConfig;
//! use stayvista_db::{init_db_pool, run_migrations};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sqlx::Error> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = init_db_pool(&config).await?;
//!     run_migrations(&pool).await?;
//!     Ok(())
//! }
//! ```

use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use stayvista_config::DatabaseConfig;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Schema migrations under `crates/stayvista-db/migrations`.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Connects a PostgreSQL pool sized by [`DatabaseConfig::max_connections`].
///
/// # Errors
///
/// Returns the connection error if the database cannot be reached.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    tracing::info!(
        max_connections = config.max_connections,
        "Database pool initialized"
    );

    Ok(pool)
}

/// Applies pending migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

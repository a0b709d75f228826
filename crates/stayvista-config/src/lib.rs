//! # StayVista Config
//!
//! Configuration types for the StayVista API, loaded from environment variables.
//!
//! - [`auth`]: Request gate settings (role lookup timeout)
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`database`]: PostgreSQL connection settings
//! - [`email`]: Email/SMTP configuration
//! - [`jwt`]: Session token signing configuration
//! - [`payment`]: Payment provider configuration
//! - [`server`]: Listener ports
//! - [`session`]: Session cookie attributes
//!
//! # Example
//!
//! ```ignore
//! use stayvista_config::{JwtConfig, SessionCookieConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let cookie_config = SessionCookieConfig::from_env();
//! ```

pub mod auth;
pub mod cors;
pub mod database;
pub mod email;
pub mod jwt;
pub mod payment;
pub mod server;
pub mod session;

pub use auth::AuthConfig;
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use jwt::JwtConfig;
pub use payment::PaymentConfig;
pub use server::ServerConfig;
pub use session::{SameSitePolicy, SessionCookieConfig};

/// Returns true when the process runs in production mode.
///
/// Reads `APP_ENV` first, then `NODE_ENV` for compatibility with existing
/// deployment manifests.
pub fn is_production() -> bool {
    std::env::var("APP_ENV")
        .or_else(|_| std::env::var("NODE_ENV"))
        .map(|v| v.eq_ignore_ascii_case("production"))
        .unwrap_or(false)
}

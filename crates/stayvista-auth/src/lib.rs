//! # StayVista Auth
//!
//! The request gate's building blocks:
//!
//! - [`claims`]: [`Identity`] and the signed [`SessionClaims`]
//! - [`jwt`]: session token issuance and verification (the credential verifier)
//! - [`directory`]: the [`UserDirectory`] lookup seam over stored user records
//! - [`authorizer`]: [`RoleAuthorizer`], the exact-match role check
//! - [`error`]: the [`AuthError`] taxonomy and its HTTP mapping
//!
//! # Example
//!
//! ```ignore
//! use stayvista_auth::{Identity, RoleAuthorizer, issue_session_token, verify_session_token};
//! use stayvista_models::Role;
//!
//! let token = issue_session_token(&Identity::new("a@x.com"), &jwt_config)?;
//! let identity = verify_session_token(&token, &jwt_config)?;
//! authorizer.authorize(&identity, Role::Host).await?;
//! ```

pub mod authorizer;
pub mod claims;
pub mod directory;
pub mod error;
pub mod jwt;

pub use authorizer::RoleAuthorizer;
pub use claims::{Identity, SessionClaims};
#[cfg(any(test, feature = "test-utils"))]
pub use directory::MemoryUserDirectory;
pub use directory::UserDirectory;
pub use error::AuthError;
pub use jwt::{issue_session_token, verify_session_token};

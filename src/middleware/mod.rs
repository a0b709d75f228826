//! Request gating.
//!
//! - [`auth`]: reading the session cookie and the [`auth::CurrentUser`] extractor
//! - [`gate`]: the ordered gate middleware (`require_session`, `require_host`,
//!   `require_admin`)
//!
//! # Gate Flow
//!
//! 1. The `token` cookie is read and verified (HS256, expiry enforced)
//! 2. For role gates, the caller's record is looked up by email and its
//!    current role compared with the required one
//! 3. The verified identity is attached to the request extensions
//! 4. The handler runs only if every step passed
//!
//! # Example
//!
//! ```ignore
//! use axum::{middleware, routing::get};
//! use crate::middleware::gate::require_host;
//!
//! let route = get(get_host_rooms)
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_host));
//! ```

pub mod auth;
pub mod gate;

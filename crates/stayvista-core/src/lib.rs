//! # StayVista Core
//!
//! Foundational types shared by every StayVista crate.
//!
//! - [`errors`]: the HTTP-aware [`AppError`] returned by handlers and services
//!
//! # Example
//!
//! ```ignore
//! use stayvista_core::AppError;
//!
//! let error = AppError::bad_request(anyhow::anyhow!("price must be a positive amount"));
//! ```

pub mod errors;

pub use errors::AppError;

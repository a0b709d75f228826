//! # StayVista API
//!
//! A vacation-rental REST backend built with Rust, Axum, and PostgreSQL.
//! Guests browse and book rooms, hosts list rooms, and admins manage roles.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Session cookie reading and the request gates
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Session token issuance and logout
//! │   ├── users/       # User records, roles, and the role directory
//! │   ├── rooms/       # Room listings
//! │   ├── bookings/    # Bookings and confirmation emails
//! │   └── payments/    # Payment intents and the provider client
//! └── utils/           # Email delivery and tracing helpers
//! ```
//!
//! The session token, the role authorizer and the auth error taxonomy live in
//! `stayvista-auth`; configuration in `stayvista-config`; documents and DTOs
//! in `stayvista-models`.
//!
//! ## Request Gates
//!
//! | Gate | Requirement |
//! |------|-------------|
//! | session | valid `token` cookie |
//! | host | valid cookie and the user's stored role is `host` |
//! | admin | valid cookie and the user's stored role is `admin` |
//!
//! Roles are read from the user store on every gated request, so a role
//! change applies to the next request without re-issuing the token.
//!
//! | Failure | Status | Body |
//! |---------|--------|------|
//! | no or invalid token | 401 | `{"error": "unauthorized access"}` |
//! | wrong or missing role | 401 | `{"error": "Unauthorized"}` |
//! | role lookup failed | 503 | `{"error": "service temporarily unavailable"}` |
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DATABASE_URL` | PostgreSQL connection string | local `stayvista` database |
//! | `ACCESS_TOKEN_SECRET` | HS256 signing secret | development secret |
//! | `APP_ENV` / `NODE_ENV` | `production` switches cookie attributes | development |
//! | `ALLOWED_ORIGINS` | Comma-separated CORS origins | `http://localhost:5173,http://localhost:5174` |
//! | `ROLE_LOOKUP_TIMEOUT_MS` | Role lookup deadline | `5000` |
//! | `STRIPE_SECRET_KEY` | Payment provider key | empty |
//! | `SMTP_ENABLED` | Send booking emails | `false` |
//! | `PORT` / `METRICS_PORT` | Listener ports | `8000` / `9000` |
//!
//! ## API Documentation
//!
//! Interactive documentation is served by Scalar at `/scalar`.

pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;

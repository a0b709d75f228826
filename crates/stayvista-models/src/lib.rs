//! # StayVista Models
//!
//! Domain documents and DTOs shared by the API, the auth core and the CLI.
//!
//! Rooms and bookings are stored as JSON documents: the API keeps whatever
//! fields the client sends and only types the handful of fields it queries
//! on (host and guest emails, the booked flag, the transaction id).
//!
//! - [`roles`]: the coarse permission tag attached to a user record
//! - [`users`]: user records and the DTOs that write them
//! - [`rooms`]: room listings
//! - [`bookings`]: bookings and their lookup query
//! - [`payments`]: payment-intent request/response
//! - [`responses`]: write acknowledgements and simple message bodies

pub mod bookings;
pub mod payments;
pub mod responses;
pub mod roles;
pub mod rooms;
pub mod users;

pub use bookings::{Booking, BookingQuery, BookingRow, GuestInfo, NewBooking};
pub use payments::{PaymentIntentRequest, PaymentIntentResponse};
pub use responses::{InsertResult, MessageResponse, SuccessResponse, WriteResult};
pub use roles::{Role, UnknownRole};
pub use rooms::{HostInfo, NewRoom, Room, RoomRow, RoomStatusDto};
pub use users::{SaveUserResponse, UpdateUserRoleDto, UpsertUserDto, UserRecord, UserRow};

/// JSON object used for schemaless document bodies.
pub type Document = serde_json::Map<String, serde_json::Value>;

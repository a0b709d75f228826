pub mod auth;
pub mod bookings;
pub mod payments;
pub mod rooms;
pub mod users;

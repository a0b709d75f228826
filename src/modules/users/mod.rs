pub mod controller;
pub mod directory;
pub mod router;
pub mod service;

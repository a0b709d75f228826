pub mod email;
pub mod tracing;

//! Configuration and input validation helpers.

/// Environment-driven configuration.
pub mod config;
/// Request field validation.
pub mod validate;

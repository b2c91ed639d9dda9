//! Application constants module.
//!
//! Centralizes the error messages, error codes, table name and sample rows
//! used throughout the application.

pub mod error_codes;
pub mod errors;
pub mod messages;
pub mod tables;

pub use error_codes::*;
pub use errors::*;
pub use messages::*;
pub use tables::*;

//! Field-level validation for request payloads.

pub mod common;
pub mod user;

pub use common::*;
pub use user::*;

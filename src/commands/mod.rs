//! Mutating requests and their handlers.

pub mod handlers;
pub mod user_commands;

pub use handlers::*;
pub use user_commands::*;

//! Read-only requests and their handlers.

pub mod handlers;
pub mod user_queries;

pub use handlers::*;
pub use user_queries::*;

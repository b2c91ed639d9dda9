//! Data-access plumbing: per-call connections and the boot-time initializer.

pub mod connection;
pub mod initializer;

pub use connection::{ConnectionFactory, SqliteConnectionFactory};
pub use initializer::DatabaseInitializer;

#[cfg(test)]
pub mod test_support;

use std::env;
use std::str::FromStr;

use lazy_static::lazy_static;
use log::warn;

lazy_static! {
    pub static ref CONFIG: Config = Config::from_env();
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub seed_sample_data: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: parse_or_default("SERVER_PORT", 8080),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://users.db".to_string()),
            seed_sample_data: parse_or_default("SEED_SAMPLE_DATA", true),
        }
    }
}

/// Read `key` from the environment, falling back to `default` when the
/// variable is unset or does not parse.
fn parse_or_default<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value '{}', using default {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}

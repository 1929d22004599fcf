//! Runtime settings read from the environment (and `.env` via dotenvy).

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::str::FromStr;

/// `DATABASE_URL` value that selects the in-memory repository.
pub const MEMORY_DATABASE: &str = "memory";

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    /// Used in `X-<app>-alert` header names and alert messages.
    pub app_name: String,
    pub body_limit_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: "postgres://localhost/foo".into(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            max_connections: 5,
            app_name: "foo-service".into(),
            body_limit_bytes: 1024 * 1024,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            bind_addr: parse_or(&lookup, "BIND_ADDR", defaults.bind_addr)?,
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", defaults.max_connections)?,
            app_name: lookup("APP_NAME").unwrap_or(defaults.app_name),
            body_limit_bytes: parse_or(&lookup, "BODY_LIMIT_BYTES", defaults.body_limit_bytes)?,
        })
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url == MEMORY_DATABASE
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

use std::env;
use std::net::SocketAddr;

use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite://todos.db?mode=rwc";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BIND_ADDR is not a socket address: {0}")]
    BindAddr(String),

    #[error("DB_MAX_CONNECTIONS is not a positive integer: {0}")]
    MaxConnections(String),
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
}

impl Config {
    /// Reads settings from the process environment, falling back to local defaults.
    pub fn new_from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse()
            .map_err(|_| ConfigError::BindAddr(bind_addr))?;

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::MaxConnections(raw)),
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            bind_addr,
            max_connections,
        })
    }
}

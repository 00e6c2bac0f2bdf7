//! Configuration types and loading
//!
//! Values are read once from the process environment at startup.

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Database configuration
    pub database: DatabaseSettings,

    /// Server configuration
    pub server: ServerSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
    /// Apply the embedded migrations when the pool is created
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseSettings {
                url: "postgres://localhost/curriculos".to_string(),
                max_connections: 10,
                connect_timeout_secs: 30,
                run_migrations: true,
            },
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        // Database
        if let Some(url) = lookup("DATABASE_URL") {
            config.database.url = url;
        }
        if let Some(value) = lookup("DB_MAX_CONNECTIONS") {
            config.database.max_connections = parse_value("DB_MAX_CONNECTIONS", &value)?;
        }
        if let Some(value) = lookup("DB_CONNECT_TIMEOUT") {
            config.database.connect_timeout_secs = parse_value("DB_CONNECT_TIMEOUT", &value)?;
        }
        if let Some(value) = lookup("RUN_MIGRATIONS") {
            config.database.run_migrations = parse_bool(&value);
        }

        // Server
        if let Some(host) = lookup("HOST") {
            config.server.host = host;
        }
        if let Some(value) = lookup("PORT") {
            config.server.port = parse_value("PORT", &value)?;
        }

        tracing::debug!(
            host = %config.server.host,
            port = config.server.port,
            max_connections = config.database.max_connections,
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Get the server address
    pub fn server_addr(&self) -> std::net::SocketAddr {
        use std::net::SocketAddr;
        let ip: std::net::IpAddr = self.server.host.parse().unwrap_or([0, 0, 0, 0].into());
        SocketAddr::new(ip, self.server.port)
    }
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        message: e.to_string(),
    })
}

fn parse_bool(value: &str) -> bool {
    matches!(value.trim(), "true" | "1" | "yes")
}

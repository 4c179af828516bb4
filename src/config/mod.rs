//! Configuration module for the BeautyConnect backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT value {0:?}")]
    InvalidPort(String),
    #[error("invalid HOST value {0:?}")]
    InvalidHost(String),
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Store connection string; the store stays unavailable when unset
    pub database_url: Option<String>,
    /// Logical database name reported by diagnostics
    pub database_name: String,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let database_name =
            env::var("DATABASE_NAME").unwrap_or_else(|_| "beautyconnect".to_string());

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let host: IpAddr = host.parse().map_err(|_| ConfigError::InvalidHost(host))?;

        let port = env::var("PORT").unwrap_or_else(|_| "8000".to_string());
        let port: u16 = port.parse().map_err(|_| ConfigError::InvalidPort(port))?;

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            database_url,
            database_name,
            bind_addr: SocketAddr::new(host, port),
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Both cases live in one test so they never race on the process environment.
    #[test]
    fn test_config_from_env() {
        env::remove_var("DATABASE_URL");
        env::remove_var("DATABASE_NAME");
        env::remove_var("HOST");
        env::remove_var("PORT");
        env::remove_var("LOG_LEVEL");

        let config = Config::from_env().unwrap();

        assert!(config.database_url.is_none());
        assert_eq!(config.database_name, "beautyconnect");
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:8000");
        assert_eq!(config.log_level, "info");

        env::set_var("PORT", "not-a-port");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(ref p) if p == "not-a-port"));
        env::remove_var("PORT");
    }
}

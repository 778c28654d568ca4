//! Server configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `STUDENTS_*` environment variables and
//! configuration files, in OrthoConfig's usual precedence.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// The bind address is not a `host:port` socket address.
    #[error("invalid bind address {value}: {message}")]
    BindAddr { value: String, message: String },
    /// The pool size must allow at least one connection.
    #[error("pool_max_size must be at least 1")]
    EmptyPool,
}

/// Configuration values for the student registry server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STUDENTS")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string. When absent, records are kept in memory.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Send `Access-Control-Allow-Origin: *` on every response.
    #[ortho_config(default = true)]
    pub allow_any_origin: bool,
}

impl ServerSettings {
    /// Parsed bind address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddr`] when the value cannot be parsed.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool size, falling back to 10.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::EmptyPool`] for a configured size of zero.
    pub fn pool_max_size(&self) -> Result<u32, SettingsError> {
        match self.pool_max_size {
            Some(0) => Err(SettingsError::EmptyPool),
            Some(size) => Ok(size),
            None => Ok(DEFAULT_POOL_MAX_SIZE),
        }
    }
}

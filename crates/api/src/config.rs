//! Shell configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

pub const BIND_ENV: &str = "TENANTHR_BIND";
pub const MARKER_PATH_ENV: &str = "TENANTHR_MARKER_PATH";

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_MARKER_PATH: &str = ".tenanthr/session-role";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("TENANTHR_BIND: invalid socket address '{0}'")]
    InvalidBindAddr(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub bind_addr: SocketAddr,
    /// File holding the persisted session role.
    pub marker_path: PathBuf,
}

impl ShellConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind = lookup(BIND_ENV).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr(bind.clone()))?;

        let marker_path = lookup(MARKER_PATH_ENV)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                tracing::warn!(
                    "{} not set; persisting session marker at {}",
                    MARKER_PATH_ENV,
                    DEFAULT_MARKER_PATH
                );
                PathBuf::from(DEFAULT_MARKER_PATH)
            });

        Ok(Self {
            bind_addr,
            marker_path,
        })
    }
}

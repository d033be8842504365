//! Application configuration loaded from the environment (and `.env`).

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Optional JSON rate table replacing the built-in one
    pub rate_table_path: Option<PathBuf>,
    pub shape_cache_capacity: u64,
    pub shape_cache_ttl: Duration,
}

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SHAPE_CACHE_CAPACITY: u64 = 1_000;
const DEFAULT_SHAPE_CACHE_TTL_SECS: u64 = 60 * 60;

impl AppConfig {
    /// Read configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = parse_or(&lookup, "HOST", DEFAULT_HOST)?;
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let shape_cache_capacity =
            parse_or(&lookup, "SHAPE_CACHE_CAPACITY", DEFAULT_SHAPE_CACHE_CAPACITY)?;
        let ttl_secs = parse_or(&lookup, "SHAPE_CACHE_TTL_SECS", DEFAULT_SHAPE_CACHE_TTL_SECS)?;

        let rate_table_path = lookup("RATE_TABLE_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            host,
            port,
            rate_table_path,
            shape_cache_capacity,
            shape_cache_ttl: Duration::from_secs(ttl_secs),
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Parse `key` when it is set, otherwise fall back to `default`
fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
        None => Ok(default),
    }
}

//! Server configuration from environment variables.
//!
//! | Variable                  | Default                 |
//! |---------------------------|-------------------------|
//! | `HOST`                    | `0.0.0.0`               |
//! | `PORT`                    | `5000`                  |
//! | `CATALOG_SCOPE`           | `per_user`              |
//! | `STORAGE_BACKEND`         | `memory`                |
//! | `DATABASE_URL`            | required for `postgres` |
//! | `DB_MAX_CONNECTIONS`      | `5`                     |
//! | `DB_ACQUIRE_TIMEOUT_SECS` | `30`                    |
//! | `ALLOWED_ORIGINS`         | `http://localhost:5000` |
//! | `MAX_BODY_SIZE_BYTES`     | `65536`                 |

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderValue;
use wirespool_core::defaults::{MAX_BODY_SIZE_BYTES, SERVER_PORT};
use wirespool_core::{Error, Result};
use wirespool_db::PoolConfig;

/// How custom wire types are partitioned between callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScopeMode {
    /// One catalog for everyone.
    Shared,
    /// One custom catalog per `userId` cookie.
    #[default]
    PerUser,
}

impl FromStr for ScopeMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shared" => Ok(ScopeMode::Shared),
            "per_user" | "per-user" => Ok(ScopeMode::PerUser),
            other => Err(Error::Config(format!(
                "CATALOG_SCOPE must be 'shared' or 'per_user', got '{}'",
                other
            ))),
        }
    }
}

/// Where the catalog lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Postgres {
        database_url: String,
        pool: PoolConfig,
    },
}

impl StorageBackend {
    pub fn name(&self) -> &'static str {
        match self {
            StorageBackend::Memory => "memory",
            StorageBackend::Postgres { .. } => "postgres",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub scope_mode: ScopeMode,
    pub backend: StorageBackend,
    pub allowed_origins: Vec<HeaderValue>,
    pub max_body_size: usize,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| Error::Config(format!("PORT must be a port number, got '{}'", raw)))?,
            None => SERVER_PORT,
        };

        let scope_mode = match lookup("CATALOG_SCOPE") {
            Some(raw) => raw.parse()?,
            None => ScopeMode::default(),
        };

        let backend = match lookup("STORAGE_BACKEND")
            .unwrap_or_else(|| "memory".to_string())
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "memory" => StorageBackend::Memory,
            "postgres" | "postgresql" => {
                let database_url = lookup("DATABASE_URL")
                    .filter(|url| !url.trim().is_empty())
                    .ok_or_else(|| {
                        Error::Config("DATABASE_URL is required for the postgres backend".into())
                    })?;
                StorageBackend::Postgres {
                    database_url,
                    pool: pool_config(&lookup)?,
                }
            }
            other => {
                return Err(Error::Config(format!(
                    "STORAGE_BACKEND must be 'memory' or 'postgres', got '{}'",
                    other
                )))
            }
        };

        let allowed_origins = parse_allowed_origins(
            &lookup("ALLOWED_ORIGINS").unwrap_or_else(|| format!("http://localhost:{}", port)),
        );

        let max_body_size = positive_var(&lookup, "MAX_BODY_SIZE_BYTES", MAX_BODY_SIZE_BYTES)?;

        Ok(Self {
            host,
            port,
            scope_mode,
            backend,
            allowed_origins,
            max_body_size,
        })
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| Error::Config(format!("invalid bind address: {}", e)))
    }
}

/// Parse a positive integer variable, falling back to `default` when unset.
fn positive_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + PartialOrd + Default,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(n) if n > T::default() => Ok(n),
            _ => Err(Error::Config(format!(
                "{} must be a positive integer, got '{}'",
                key, raw
            ))),
        },
        None => Ok(default),
    }
}

/// Pool sizing for the postgres backend.
fn pool_config<F>(lookup: &F) -> Result<PoolConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = PoolConfig::default();
    let max_connections = positive_var(lookup, "DB_MAX_CONNECTIONS", defaults.max_connections)?;
    let acquire_timeout_secs = positive_var(
        lookup,
        "DB_ACQUIRE_TIMEOUT_SECS",
        defaults.acquire_timeout.as_secs(),
    )?;
    Ok(PoolConfig::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(acquire_timeout_secs)))
}

/// Parse a comma-separated list of CORS origins, skipping invalid entries.
pub fn parse_allowed_origins(origins: &str) -> Vec<HeaderValue> {
    origins
        .split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}

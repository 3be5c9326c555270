//! # Tracker Configuration
//!
//! Unified configuration for the subsystems and the HTTP boundary.
//!
//! Every value has a default; environment variables override them:
//!
//! | Variable               | Default        | Meaning                                   |
//! |------------------------|----------------|-------------------------------------------|
//! | `FT_HTTP_HOST`         | `127.0.0.1`    | Bind address                              |
//! | `FT_HTTP_PORT`         | `8080`         | Bind port                                 |
//! | `FT_REQUEST_TIMEOUT_MS`| `10000`        | Whole-request deadline                    |
//! | `FT_STORE_TIMEOUT_MS`  | `2000`         | Deadline for a single store call          |
//! | `FT_STORAGE`           | `memory`       | `memory` or `rocksdb`                     |
//! | `FT_DATA_DIR`          | `./data`       | RocksDB directory                         |
//! | `FT_TOKENS`            | empty          | `token=id:email:role;...` identity table  |
//! | `FT_CORS_ORIGINS`      | unset          | Comma-separated origins; enables CORS     |
//! | `FT_LOG_JSON`          | `false`        | Emit logs as JSON lines                   |
//!
//! Malformed values are rejected rather than silently replaced by defaults.

use ft_01_request_lifecycle::LifecycleConfig;
use ft_02_voting::VotingConfig;
use ft_03_api_gateway::{ConfigError as GatewayConfigError, CorsConfig, GatewayConfig};
use std::net::IpAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Complete tracker configuration.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// HTTP boundary configuration.
    pub gateway: GatewayConfig,
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Upper bound on any single store call, shared by both subsystems.
    pub store_timeout: Duration,
    /// Raw identity table, parsed by `StaticTokenResolver::parse`.
    pub tokens: String,
    /// Emit JSON log lines instead of the human-readable format.
    pub log_json: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig::default(),
            storage: StorageConfig::default(),
            store_timeout: Duration::from_secs(2),
            tokens: String::new(),
            log_json: false,
        }
    }
}

/// Storage backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    RocksDb,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "rocksdb" => Ok(StorageBackend::RocksDb),
            other => Err(format!("unknown storage backend '{}'", other)),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Data directory for the RocksDB backend.
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            data_dir: PathBuf::from("./data"),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable could not be parsed.
    #[error("invalid {var}={value:?}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("store timeout cannot be 0")]
    InvalidStoreTimeout,

    /// RocksDB was requested but the binary was built without it.
    #[error("FT_STORAGE=rocksdb requires building with the `rocksdb` feature")]
    RocksDbUnavailable,

    #[error(transparent)]
    Gateway(#[from] GatewayConfigError),
}

impl TrackerConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Loads configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = read::<IpAddr, _>(&lookup, "FT_HTTP_HOST")? {
            config.gateway.host = host;
        }
        if let Some(port) = read::<u16, _>(&lookup, "FT_HTTP_PORT")? {
            config.gateway.port = port;
        }
        if let Some(ms) = read::<u64, _>(&lookup, "FT_REQUEST_TIMEOUT_MS")? {
            config.gateway.request_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = read::<u64, _>(&lookup, "FT_STORE_TIMEOUT_MS")? {
            config.store_timeout = Duration::from_millis(ms);
        }
        if let Some(backend) = read::<StorageBackend, _>(&lookup, "FT_STORAGE")? {
            config.storage.backend = backend;
        }
        if let Some(dir) = lookup("FT_DATA_DIR") {
            config.storage.data_dir = PathBuf::from(dir);
        }
        if let Some(tokens) = lookup("FT_TOKENS") {
            config.tokens = tokens;
        }
        if let Some(origins) = lookup("FT_CORS_ORIGINS") {
            config.gateway.cors = CorsConfig {
                enabled: true,
                allowed_origins: origins
                    .split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect(),
                ..CorsConfig::default()
            };
        }
        if let Some(json) = read::<bool, _>(&lookup, "FT_LOG_JSON")? {
            config.log_json = json;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validates the combined configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_timeout.is_zero() {
            return Err(ConfigError::InvalidStoreTimeout);
        }
        if self.storage.backend == StorageBackend::RocksDb && !cfg!(feature = "rocksdb") {
            return Err(ConfigError::RocksDbUnavailable);
        }
        self.gateway.validate()?;
        Ok(())
    }

    pub fn lifecycle(&self) -> LifecycleConfig {
        LifecycleConfig {
            store_timeout: self.store_timeout,
        }
    }

    pub fn voting(&self) -> VotingConfig {
        VotingConfig {
            store_timeout: self.store_timeout,
        }
    }
}

fn read<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                var,
                reason: e.to_string(),
                value,
            }),
    }
}

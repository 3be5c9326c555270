//! Gateway configuration with validation.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use thiserror::Error;

/// Main gateway configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port (default: 8080)
    pub port: u16,
    /// Whole-request deadline enforced at the HTTP layer
    pub request_timeout: Duration,
    /// Largest accepted request body
    pub max_body_bytes: usize,
    /// CORS configuration
    pub cors: CorsConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            port: 8080,
            request_timeout: Duration::from_secs(10),
            max_body_bytes: 64 * 1024,
            cors: CorsConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "request timeout cannot be 0".into(),
            ));
        }

        if self.max_body_bytes == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_body_bytes cannot be 0".into(),
            ));
        }

        if self.cors.enabled && self.cors.allowed_origins.is_empty() {
            return Err(ConfigError::InvalidCors(
                "CORS enabled without any allowed origin".into(),
            ));
        }

        Ok(())
    }

    /// Get HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// CORS configuration
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Enable CORS headers (off by default; the tracker is same-origin)
    pub enabled: bool,
    /// Allowed origins (`*` for any)
    pub allowed_origins: Vec<String>,
    /// Preflight cache lifetime in seconds
    pub max_age: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            allowed_origins: Vec::new(),
            max_age: 3600,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("port cannot be 0")]
    InvalidPort,
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
    #[error("invalid CORS settings: {0}")]
    InvalidCors(String),
}

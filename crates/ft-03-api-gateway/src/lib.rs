//! # ft-03-api-gateway
//!
//! HTTP boundary of the feedback tracker.
//!
//! ## Overview
//!
//! This subsystem provides:
//! - **Identity**: `Authorization: Bearer` resolved through `IdentityResolver`;
//!   no principal means 401 before any subsystem is called
//! - **Routing**: thin handlers over `RequestLifecycleApi` and `VotingApi`
//! - **Error translation**: one mapping from error kind to HTTP status
//!   (`domain::error::status_for`)
//! - **Middleware**: request tracing, whole-request timeout, body size limit,
//!   optional CORS
//!
//! ## Architecture
//!
//! ```text
//! HTTP ──→ Trace ──→ CORS ──→ Timeout ──→ Body limit ──→ Handler
//!                                                          │
//!                                        Authenticated ────┤ (IdentityResolver)
//!                                                          │
//!                              ┌───────────────────────────┴──────────────┐
//!                              ▼                                          ▼
//!                   Request Lifecycle (1)                            Voting (2)
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use ft_03_api_gateway::{ApiGatewayService, AppState, GatewayConfig};
//!
//! let gateway = ApiGatewayService::new(GatewayConfig::default(), state)?;
//! gateway.serve(shutdown_signal()).await?;
//! ```

pub mod adapters;
pub mod domain;
pub mod extract;
pub mod middleware;
pub mod ports;
pub mod routes;
pub mod service;

pub use adapters::{StaticTokenResolver, TokenTableError};
pub use domain::{
    status_for, ApiError, ApiResult, ConfigError, CorsConfig, GatewayConfig, GatewayError,
};
pub use middleware::Authenticated;
pub use ports::outbound::IdentityResolver;
pub use routes::{tracker_routes, AppState};
pub use service::ApiGatewayService;

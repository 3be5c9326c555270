//! Adapters layer for the API Gateway.

pub mod error_conversions;
pub mod static_identity;

pub use static_identity::{StaticTokenResolver, TokenTableError};

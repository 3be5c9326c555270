//! Middleware for the API Gateway.
//!
//! Layer order: Request → Trace → CORS → Timeout → Body limit → Handler.
//! Authentication is an extractor rather than a layer so `/health` stays open.

pub mod auth;
pub mod cors;

pub use auth::{bearer_token, Authenticated};
pub use cors::create_cors_layer;

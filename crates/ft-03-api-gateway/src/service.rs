//! API Gateway service - HTTP server entry point.

use crate::domain::config::GatewayConfig;
use crate::domain::error::GatewayError;
use crate::middleware::create_cors_layer;
use crate::routes::{tracker_routes, AppState};
use axum::Router;
use std::future::Future;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// API Gateway service state
pub struct ApiGatewayService {
    config: GatewayConfig,
    state: AppState,
}

impl ApiGatewayService {
    /// Create a new API Gateway service
    pub fn new(config: GatewayConfig, state: AppState) -> Result<Self, GatewayError> {
        config
            .validate()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        Ok(Self { config, state })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Build HTTP router with the middleware stack applied.
    pub fn router(&self) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(RequestBodyLimitLayer::new(self.config.max_body_bytes))
            .layer(TimeoutLayer::new(self.config.request_timeout));

        let mut router = tracker_routes()
            .layer(middleware)
            .with_state(self.state.clone());

        if let Some(cors) = create_cors_layer(&self.config.cors) {
            router = router.layer(cors);
        }
        router
    }

    /// Serve until `shutdown` resolves.
    pub async fn serve<F>(self, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.http_addr();
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(format!("{}: {}", addr, e)))?;

        info!(addr = %addr, "[ft-03] HTTP server listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| GatewayError::Server(e.to_string()))?;

        info!("[ft-03] HTTP server stopped");
        Ok(())
    }
}

//! # HTTP Server
//!
//! Combines the reservation and health routers, CORS and request tracing.

use std::future::Future;
use std::io;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::config::HttpServerConfig;
use super::observability_routes::health_routes;
use super::reservation_routes::{reservation_routes, ReservationState};
use crate::log_event;
use crate::observability::Event;
use crate::store::ConnectionSource;

/// HTTP server for the reservation service
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server for `state` with the given configuration
    pub fn new<S: ConnectionSource>(config: HttpServerConfig, state: ReservationState<S>) -> Self {
        let router = Self::build_router(&config, Arc::new(state));
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router<S: ConnectionSource>(
        config: &HttpServerConfig,
        state: Arc<ReservationState<S>>,
    ) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            // ServiceConfig::validate rejects bad origins before startup
            let origins = config.allowed_origins().unwrap_or_else(|e| {
                warn!(error = %e, "no CORS origin allowed");
                Vec::new()
            });

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes())
            .merge(reservation_routes(state))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(cors),
            )
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until `shutdown` resolves, then finish in-flight requests
    pub async fn start<F>(self, shutdown: F) -> Result<(), io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.socket_addr();
        let listener = TcpListener::bind(addr.as_str()).await.map_err(|e| {
            io::Error::new(e.kind(), format!("cannot listen on '{}': {}", addr, e))
        })?;
        log_event!(Event::ServerListening, addr = %listener.local_addr()?);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}

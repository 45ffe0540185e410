//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout)
//! - Bind server to listener and stop on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{public_subset, AppConfig, PublicConfig, RuntimeMode};
use crate::http::handlers;
use crate::lifecycle::Shutdown;

/// Upper bound for any single request.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Application state injected into handlers.
///
/// Deliberately holds only the public partition.
#[derive(Debug, Clone)]
pub struct AppState {
    pub mode: RuntimeMode,
    pub public: Arc<PublicConfig>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            mode: config.mode(),
            public: Arc::new(public_subset(config)),
        }
    }
}

/// HTTP server exposing the client-safe configuration.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(config: Arc<AppConfig>) -> Self {
        let state = AppState::new(&config);
        Self {
            router: Self::build_router(state),
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api/public-config", get(handlers::public_config))
            .route("/env.js", get(handlers::env_script))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The router, for embedding or driving in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve until `shutdown` fires.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let mut stop = shutdown.subscribe();
        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = stop.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

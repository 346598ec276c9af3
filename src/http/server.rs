//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the not-found fallback
//! - Wire up middleware (tracing, request ID, timeout, redirects)
//! - Bind server to listener
//! - Stop gracefully on the shutdown signal

use axum::{middleware::from_fn_with_state, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::RedirectorConfig;
use crate::http::middleware::not_found::{redirect_on_not_found, RedirectState};
use crate::http::request::{MakeRequestUuid, X_REQUEST_ID};
use crate::http::response::not_found;
use crate::redirect::RedirectResolver;
use crate::rules::RuleStore;
use crate::site::{SiteError, SiteLinks};

/// HTTP server answering unmatched requests with redirects or 404s.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server serving the rules held in `rules`.
    pub fn new(config: RedirectorConfig, rules: Arc<RuleStore>) -> Result<Self, SiteError> {
        let links = SiteLinks::from_config(&config.site)?;
        let resolver = RedirectResolver::from_config(links, &config.redirects);

        let state = RedirectState {
            rules,
            resolver: Arc::new(resolver),
            on_repository_error: config.redirects.on_repository_error,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &RedirectorConfig, state: RedirectState) -> Router {
        Router::new()
            .fallback(not_found)
            .layer(from_fn_with_state(state, redirect_on_not_found))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
            )
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router, for serving in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

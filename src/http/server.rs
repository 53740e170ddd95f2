//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the account endpoints
//! - Wire up middleware (tracing, request ID, timeout, body limit, JSON failures)
//! - Own the upstream client for the lifetime of the process
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::Request,
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::handlers;
use crate::http::request::request_id_of;
use crate::http::response::json_failures;
use crate::upstream::{AccountsApi, HttpAccountsClient, UpstreamError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountsApi>,
}

/// The account proxy service: upstream client plus router, built once at startup.
pub struct AccountProxy {
    router: Router,
    config: ServiceConfig,
}

impl AccountProxy {
    /// Create the service with a reqwest client for the configured upstream.
    pub fn new(config: ServiceConfig) -> Result<Self, UpstreamError> {
        let client = HttpAccountsClient::new(&config.upstream)?;
        Ok(Self::with_client(config, Arc::new(client)))
    }

    /// Create the service around any `AccountsApi` implementation.
    pub fn with_client(config: ServiceConfig, accounts: Arc<dyn AccountsApi>) -> Self {
        let router = build_router(&config, AppState { accounts });
        Self { router, config }
    }

    /// Run the server on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
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

    /// The router, for driving the service without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &ServiceConfig, state: AppState) -> Router {
    Router::new()
        .route("/form3Client/accounts", post(handlers::create_account))
        .route(
            "/form3Client/accounts/",
            get(handlers::get_account_without_id).delete(handlers::delete_account_without_id),
        )
        .route(
            "/form3Client/accounts/{account_id}",
            get(handlers::get_account).delete(handlers::delete_account),
        )
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(config.server.max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::map_response(json_failures))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id_of(request),
            )
        }))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

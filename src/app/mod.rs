//! The HTTP application: shared state, routes and the server loop.
//!
//! # Example
//!
//! ```rust,no_run
//! use shopify_app::app::{self, AppState};
//! use shopify_app::AppConfig;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! app::serve(AppState::new(config)).await?;
//! # Ok(())
//! # }
//! ```

pub mod handlers;
pub mod views;

use std::sync::Arc;

use axum::extract::FromRef;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::auth::oauth::{ShopifyTokenExchange, TokenExchange};
use crate::auth::SessionCodec;
use crate::config::AppConfig;

/// Immutable state shared by every request.
#[derive(Clone)]
pub struct AppState {
    /// The app configuration.
    pub config: Arc<AppConfig>,
    /// Cookie encryption for sessions and OAuth state.
    pub codec: SessionCodec,
    /// The code-for-token exchange used by the callback.
    pub token_exchange: Arc<dyn TokenExchange>,
}

impl AppState {
    /// Builds state that exchanges tokens with Shopify over HTTPS.
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self::with_token_exchange(config, Arc::new(ShopifyTokenExchange::new()))
    }

    /// Builds state with a custom [`TokenExchange`].
    #[must_use]
    pub fn with_token_exchange(config: AppConfig, token_exchange: Arc<dyn TokenExchange>) -> Self {
        Self {
            codec: SessionCodec::from_config(&config),
            config: Arc::new(config),
            token_exchange,
        }
    }
}

impl FromRef<AppState> for SessionCodec {
    fn from_ref(state: &AppState) -> Self {
        state.codec.clone()
    }
}

/// Builds the router with every page and OAuth route.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/auth", get(handlers::auth_page))
        .route("/auth/begin", get(handlers::begin))
        .route(handlers::CALLBACK_PATH, get(handlers::callback))
        .route("/test", get(handlers::test_page))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds the configured address and serves until Ctrl-C.
///
/// # Errors
///
/// Returns an I/O error if the listener cannot be bound or the server fails.
pub async fn serve(state: AppState) -> std::io::Result<()> {
    let addr = state.config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        host = state.config.host().as_ref(),
        environment = ?state.config.environment(),
        "listening"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        // Without a signal handler, keep serving until the process is killed.
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

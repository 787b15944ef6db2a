//! # Shopify App Shell
//!
//! A minimal embedded Shopify app: OAuth installation against a shop, a
//! session kept in an encrypted cookie, and a dashboard and sample data page
//! that only render for an installed shop.
//!
//! ## Overview
//!
//! - Type-safe configuration via [`AppConfig`] and [`AppConfigBuilder`], loaded
//!   from the environment with [`AppConfig::from_env`]
//! - Validated newtypes for credentials, secrets and shop domains
//! - OAuth scope handling with implied scope support
//! - The OAuth 2.0 authorization code flow via [`auth::oauth`]
//! - Encrypted cookie sessions and a fail-closed guard via [`auth`]
//! - The axum router and server loop via [`app`]
//!
//! ## Quick Start
//!
//! ```rust
//! use shopify_app::{AppConfig, ApiKey, ApiSecretKey, HostUrl, SessionSecret};
//! use shopify_app::app::{router, AppState};
//!
//! let config = AppConfig::builder()
//!     .api_key(ApiKey::new("your-api-key").unwrap())
//!     .api_secret_key(ApiSecretKey::new("your-api-secret").unwrap())
//!     .session_secret(SessionSecret::new("a-long-random-string").unwrap())
//!     .host(HostUrl::new("https://your-app.example.com").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let app = router(AppState::new(config));
//! // axum::serve(listener, app).await
//! # let _ = app;
//! ```
//!
//! ## Routes
//!
//! | Route | Behavior |
//! |---|---|
//! | `GET /` | Dashboard, or an install prompt without a session |
//! | `GET /auth` | Install form, accepts `shop` and `error` |
//! | `GET /auth/begin?shop=` | Redirects to Shopify, or back to `/auth` with `error=invalid_shop` |
//! | `GET /auth/callback` | Sets the session cookie and redirects to `/`, or to `/auth` with `error=auth_failed` |
//! | `GET /test` | Sample products table, or "Authentication Required" |
//!
//! Pages answer with JSON instead of HTML when the `Accept` header asks for
//! `application/json`.

pub mod app;
pub mod auth;
pub mod config;
pub mod error;

pub use auth::{AuthGuard, AuthOutcome, AuthScopes, Session, SessionCodec};
pub use config::{
    ApiKey, ApiSecretKey, AppConfig, AppConfigBuilder, Environment, HostUrl, SessionSecret,
    ShopDomain,
};
pub use error::ConfigError;

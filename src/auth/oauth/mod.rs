//! OAuth 2.0 authorization code grant for Shopify apps.
//!
//! The flow has two halves:
//!
//! 1. **Authorization Initiation** ([`begin_auth`]): Generate an authorization URL
//!    and a state nonce, then redirect the merchant to Shopify.
//!
//! 2. **Callback Completion** ([`complete_auth`]): When Shopify redirects back,
//!    verify the callback and exchange the code for an access token.
//!
//! # Security Features
//!
//! - **HMAC Validation**: Callbacks are verified using HMAC-SHA256 signatures
//! - **CSRF Protection**: The state nonce must match the one stored at initiation
//! - **Constant-Time Comparison**: Signatures and nonces are compared in constant time
//! - **Key Rotation Support**: An old API secret key keeps in-flight installs working
//!
//! # Example
//!
//! ```rust,no_run
//! use shopify_app::{AppConfig, ShopDomain};
//! use shopify_app::auth::oauth::{begin_auth, complete_auth, AuthQuery, ShopifyTokenExchange};
//!
//! # async fn run(config: AppConfig, query: AuthQuery) -> Result<(), Box<dyn std::error::Error>> {
//! let shop = ShopDomain::new("example-shop.myshopify.com")?;
//! let started = begin_auth(&config, &shop, "/auth/callback", false, None);
//! // Persist started.state, redirect to started.auth_url ...
//!
//! // ... later, in the callback handler:
//! let session = complete_auth(
//!     &config,
//!     &ShopifyTokenExchange::new(),
//!     &query,
//!     Some(started.state.as_ref()),
//! )
//! .await?;
//! println!("installed on {}", session.shop);
//! # Ok(())
//! # }
//! ```

mod auth_query;
mod begin_auth;
mod callback;
mod error;
pub mod hmac;
mod state;

pub use auth_query::AuthQuery;
pub use begin_auth::{begin_auth, BeginAuthResult};
pub use callback::{complete_auth, ShopifyTokenExchange, TokenExchange};
pub use error::OAuthError;
pub use state::StateParam;

//! OAuth authorization URL generation.
//!
//! [`begin_auth`] is the first step of the authorization code flow. It
//! generates a state nonce for CSRF protection and the Shopify URL the
//! merchant is redirected to.
//!
//! # Example
//!
//! ```rust
//! use shopify_app::{AppConfig, ApiKey, ApiSecretKey, HostUrl, SessionSecret, ShopDomain};
//! use shopify_app::auth::oauth::begin_auth;
//!
//! let config = AppConfig::builder()
//!     .api_key(ApiKey::new("your-api-key").unwrap())
//!     .api_secret_key(ApiSecretKey::new("your-secret").unwrap())
//!     .session_secret(SessionSecret::new("cookie-secret").unwrap())
//!     .host(HostUrl::new("https://your-app.com").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let shop = ShopDomain::new("example-shop.myshopify.com").unwrap();
//! let result = begin_auth(&config, &shop, "/auth/callback", false, None);
//!
//! assert!(result.auth_url.starts_with("https://example-shop.myshopify.com/admin/oauth/authorize?"));
//! // Store result.state in the state cookie, then redirect to result.auth_url
//! ```

use crate::auth::oauth::state::StateParam;
use crate::auth::AuthScopes;
use crate::config::{AppConfig, ShopDomain};

/// Result of initiating OAuth authorization.
///
/// The `state` value must be stored by the caller (the app keeps it in an
/// encrypted cookie) and handed to
/// [`complete_auth`](crate::auth::oauth::complete_auth) when the callback
/// arrives.
#[derive(Clone, Debug)]
pub struct BeginAuthResult {
    /// The full authorization URL to redirect the user to.
    pub auth_url: String,

    /// The state parameter generated for this authorization request.
    pub state: StateParam,
}

/// Initiates the OAuth authorization code flow.
///
/// # Arguments
///
/// * `config` - App configuration; `host` supplies the redirect URI origin
/// * `shop` - The shop domain to authorize against
/// * `redirect_path` - Path on the app that receives the callback
/// * `is_online` - `true` requests a per-user token via `grant_options[]=per-user`
/// * `scope_override` - Scopes to request instead of `config.scopes()`
///
/// The URL also repeats `shop` as a query parameter so the authorize page
/// and any logs name the store being installed.
#[must_use]
pub fn begin_auth(
    config: &AppConfig,
    shop: &ShopDomain,
    redirect_path: &str,
    is_online: bool,
    scope_override: Option<&AuthScopes>,
) -> BeginAuthResult {
    let state = StateParam::new();
    let scopes = scope_override.unwrap_or_else(|| config.scopes());
    let redirect_uri = format!("{}{}", config.host().as_ref(), redirect_path);

    let mut params = vec![
        ("client_id", config.api_key().as_ref().to_string()),
        ("scope", scopes.to_string()),
        ("redirect_uri", redirect_uri),
        ("state", state.to_string()),
        ("shop", shop.to_string()),
    ];

    if is_online {
        params.push(("grant_options[]", "per-user".to_string()));
    }

    let query_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    let auth_url = format!(
        "https://{}/admin/oauth/authorize?{}",
        shop.as_ref(),
        query_string
    );

    BeginAuthResult { auth_url, state }
}

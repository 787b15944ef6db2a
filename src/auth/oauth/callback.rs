//! OAuth callback validation and code-for-token exchange.
//!
//! [`complete_auth`] runs every check on the callback before any network
//! call is made, then asks a [`TokenExchange`] for the access token. The
//! exchange is a trait so the HTTP leg can be pointed at a mock server.

use async_trait::async_trait;
use serde::Serialize;

use crate::auth::oauth::hmac::{constant_time_compare, validate_hmac};
use crate::auth::oauth::{AuthQuery, OAuthError};
use crate::auth::session::AccessTokenResponse;
use crate::auth::Session;
use crate::config::{AppConfig, ShopDomain};

/// Trades an authorization code for an access token.
#[async_trait]
pub trait TokenExchange: Send + Sync {
    /// Exchanges `code` for `shop`'s access token.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::TokenExchangeFailed`] if the endpoint cannot be
    /// reached, answers with a non-2xx status, or returns an unparseable body.
    async fn exchange(
        &self,
        config: &AppConfig,
        shop: &ShopDomain,
        code: &str,
    ) -> Result<AccessTokenResponse, OAuthError>;
}

#[derive(Serialize)]
struct TokenExchangeRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
}

/// [`TokenExchange`] over HTTPS against `https://{shop}/admin/oauth/access_token`.
#[derive(Clone, Debug, Default)]
pub struct ShopifyTokenExchange {
    client: reqwest::Client,
    base_url: Option<String>,
}

impl ShopifyTokenExchange {
    /// Creates an exchange that talks to the shop's own domain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sends every exchange to `base_url` instead of the shop's domain.
    ///
    /// The path `/admin/oauth/access_token` is appended unchanged.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: Some(base_url.into().trim_end_matches('/').to_string()),
        }
    }

    fn token_url(&self, shop: &ShopDomain) -> String {
        self.base_url.as_ref().map_or_else(
            || format!("https://{}/admin/oauth/access_token", shop.as_ref()),
            |base| format!("{base}/admin/oauth/access_token"),
        )
    }
}

#[async_trait]
impl TokenExchange for ShopifyTokenExchange {
    async fn exchange(
        &self,
        config: &AppConfig,
        shop: &ShopDomain,
        code: &str,
    ) -> Result<AccessTokenResponse, OAuthError> {
        let request_body = TokenExchangeRequest {
            client_id: config.api_key().as_ref(),
            client_secret: config.api_secret_key().as_ref(),
            code,
        };

        let response = self
            .client
            .post(self.token_url(shop))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| OAuthError::TokenExchangeFailed {
                status: 0,
                message: format!("Network error: {e}"),
            })?;

        let status = response.status().as_u16();

        if !response.status().is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(OAuthError::TokenExchangeFailed {
                status,
                message: error_body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| OAuthError::TokenExchangeFailed {
                status,
                message: format!("Failed to parse token response: {e}"),
            })
    }
}

/// Validates an OAuth callback and exchanges its code for a [`Session`].
///
/// Checks run in this order, and the first failure wins:
///
/// 1. a state nonce was stored when the flow began (`expected_state`)
/// 2. the `hmac` signs the remaining parameters with the API secret (or the old one)
/// 3. the `state` parameter equals the stored nonce, compared in constant time
/// 4. `shop` is a valid `*.myshopify.com` domain
/// 5. `code` is present
///
/// Only then is the token endpoint called.
///
/// # Errors
///
/// Returns the [`OAuthError`] of the first failed check, or the exchange error.
pub async fn complete_auth(
    config: &AppConfig,
    exchanger: &dyn TokenExchange,
    query: &AuthQuery,
    expected_state: Option<&str>,
) -> Result<Session, OAuthError> {
    let expected_state = expected_state.ok_or(OAuthError::MissingState)?;

    if !validate_hmac(query, config) {
        return Err(OAuthError::InvalidHmac);
    }

    if !constant_time_compare(query.state(), expected_state) {
        return Err(OAuthError::StateMismatch {
            received: query.state().to_string(),
        });
    }

    let shop = ShopDomain::new(query.shop()).map_err(|_| OAuthError::InvalidCallback {
        reason: format!("Invalid shop domain: {}", query.shop()),
    })?;

    if query.code().is_empty() {
        return Err(OAuthError::InvalidCallback {
            reason: "missing authorization code".to_string(),
        });
    }

    let token_response = exchanger.exchange(config, &shop, query.code()).await?;

    Ok(Session::from_access_token_response(shop, &token_response))
}

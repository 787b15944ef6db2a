//! The authenticated-shop session.
//!
//! A [`Session`] is created once, by the OAuth callback, from Shopify's
//! access token response. It then travels in the session cookie and is read
//! back by the auth guard on every request.

use crate::auth::AuthScopes;
use crate::config::ShopDomain;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Represents an authenticated shop.
///
/// # Example
///
/// ```rust
/// use shopify_app::{Session, ShopDomain};
///
/// let shop = ShopDomain::new("my-store.myshopify.com").unwrap();
/// let session = Session::new(
///     Session::offline_id(&shop),
///     shop,
///     "access-token".to_string(),
///     "read_products".parse().unwrap(),
///     false,
///     None,
/// );
///
/// assert_eq!(session.id, "offline_my-store.myshopify.com");
/// assert!(session.is_active());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier for this session.
    pub id: String,

    /// The shop this session is for.
    pub shop: ShopDomain,

    /// The access token issued by Shopify.
    pub access_token: String,

    /// The OAuth scopes granted to this session.
    pub scopes: AuthScopes,

    /// Whether this is an online (user-specific) session.
    pub is_online: bool,

    /// When this session expires, if applicable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,

    /// The Shopify user behind an online session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

impl Session {
    /// Creates a new session with the specified parameters.
    #[must_use]
    pub const fn new(
        id: String,
        shop: ShopDomain,
        access_token: String,
        scopes: AuthScopes,
        is_online: bool,
        expires: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            shop,
            access_token,
            scopes,
            is_online,
            expires,
            user_id: None,
        }
    }

    /// Returns the id Shopify apps conventionally use for a shop's offline session.
    #[must_use]
    pub fn offline_id(shop: &ShopDomain) -> String {
        format!("offline_{shop}")
    }

    /// Returns the id of an online session for `user_id` on `shop`.
    #[must_use]
    pub fn online_id(shop: &ShopDomain, user_id: u64) -> String {
        format!("{shop}_{user_id}")
    }

    /// Builds a session from a token endpoint response.
    ///
    /// The response carries an `associated_user` only for online tokens, so
    /// its presence decides whether the session is online.
    #[must_use]
    pub fn from_access_token_response(shop: ShopDomain, response: &AccessTokenResponse) -> Self {
        // Unparseable scope strings are recorded as empty rather than failing the install.
        let scopes = response.scope.parse().unwrap_or_default();
        let expires = response
            .expires_in
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime));

        match &response.associated_user {
            Some(user) => Self {
                id: Self::online_id(&shop, user.id),
                shop,
                access_token: response.access_token.clone(),
                scopes,
                is_online: true,
                expires,
                user_id: Some(user.id),
            },
            None => Self::new(
                Self::offline_id(&shop),
                shop,
                response.access_token.clone(),
                scopes,
                false,
                expires,
            ),
        }
    }

    /// Returns `true` if this session has expired.
    ///
    /// Sessions without an expiration time are considered never expired.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.expires.is_some_and(|expires| Utc::now() > expires)
    }

    /// Returns `true` if this session is active (not expired and has access token).
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.access_token.is_empty() && !self.expired()
    }
}

// Verify Session is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Session>();
};

/// Body of a successful `POST /admin/oauth/access_token` response.
#[derive(Clone, Debug, Deserialize)]
pub struct AccessTokenResponse {
    /// The issued access token.
    pub access_token: String,

    /// Comma-separated granted scopes.
    #[serde(default)]
    pub scope: String,

    /// Lifetime in seconds, present for online and expiring tokens.
    #[serde(default)]
    pub expires_in: Option<i64>,

    /// The authorizing user, present for online tokens.
    #[serde(default)]
    pub associated_user: Option<AssociatedUserRef>,
}

/// The part of `associated_user` a session keeps.
#[derive(Clone, Debug, Deserialize)]
pub struct AssociatedUserRef {
    /// The Shopify user id.
    pub id: u64,
}

//! Query parameters of an OAuth callback.

use std::collections::BTreeMap;

/// The query string Shopify sends to the callback URL.
///
/// Shopify signs every parameter except `hmac` (and the legacy `signature`),
/// so all of them are kept, not only the ones the app reads.
///
/// # Example
///
/// ```rust
/// use shopify_app::auth::oauth::AuthQuery;
/// use std::collections::BTreeMap;
///
/// let params = BTreeMap::from([
///     ("shop".to_string(), "demo.myshopify.com".to_string()),
///     ("code".to_string(), "abc".to_string()),
///     ("hmac".to_string(), "ff".to_string()),
///     ("timestamp".to_string(), "1700000000".to_string()),
/// ]);
/// let query = AuthQuery::from_params(params);
///
/// assert_eq!(query.shop(), "demo.myshopify.com");
/// assert_eq!(
///     query.to_signable_string(),
///     "code=abc&shop=demo.myshopify.com&timestamp=1700000000"
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthQuery {
    params: BTreeMap<String, String>,
}

impl AuthQuery {
    /// Wraps decoded query parameters.
    #[must_use]
    pub const fn from_params(params: BTreeMap<String, String>) -> Self {
        Self { params }
    }

    /// Returns a parameter value, or `""` if absent.
    #[must_use]
    pub fn get(&self, name: &str) -> &str {
        self.params.get(name).map_or("", String::as_str)
    }

    /// The `shop` parameter.
    #[must_use]
    pub fn shop(&self) -> &str {
        self.get("shop")
    }

    /// The authorization `code` parameter.
    #[must_use]
    pub fn code(&self) -> &str {
        self.get("code")
    }

    /// The `state` parameter.
    #[must_use]
    pub fn state(&self) -> &str {
        self.get("state")
    }

    /// The `hmac` parameter.
    #[must_use]
    pub fn hmac(&self) -> &str {
        self.get("hmac")
    }

    /// Sets or replaces a parameter.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.insert(name.into(), value.into());
    }

    /// Builds the message Shopify signs: every parameter except `hmac` and
    /// `signature`, sorted by name, joined as `name=value` pairs with `&`.
    #[must_use]
    pub fn to_signable_string(&self) -> String {
        self.params
            .iter()
            .filter(|(name, _)| !matches!(name.as_str(), "hmac" | "signature"))
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl From<BTreeMap<String, String>> for AuthQuery {
    fn from(params: BTreeMap<String, String>) -> Self {
        Self::from_params(params)
    }
}

//! Validated newtype wrappers for configuration values.
//!
//! Each wrapper validates its contents on construction, so a value of one of
//! these types is always well formed.

use crate::error::ConfigError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

static SHOP_DOMAIN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9-]*\.myshopify\.com$").expect("shop domain pattern compiles")
});

/// A validated Shopify API key.
///
/// # Example
///
/// ```rust
/// use shopify_app::ApiKey;
///
/// let key = ApiKey::new("my-api-key").unwrap();
/// assert_eq!(key.as_ref(), "my-api-key");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated Shopify API secret key.
///
/// The `Debug` implementation masks the value so the secret never reaches
/// log output.
///
/// ```rust
/// use shopify_app::ApiSecretKey;
///
/// let secret = ApiSecretKey::new("my-secret").unwrap();
/// assert_eq!(format!("{:?}", secret), "ApiSecretKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiSecretKey(String);

impl ApiSecretKey {
    /// Creates a new validated API secret key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiSecretKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyApiSecretKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ApiSecretKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiSecretKey(*****)")
    }
}

/// The secret the session cookie is encrypted with.
///
/// Masked in debug output like [`ApiSecretKey`].
#[derive(Clone, PartialEq, Eq)]
pub struct SessionSecret(String);

impl SessionSecret {
    /// Creates a new session secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptySessionSecret`] if the secret is empty.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::EmptySessionSecret);
        }
        Ok(Self(secret))
    }
}

impl AsRef<str> for SessionSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionSecret(*****)")
    }
}

/// A validated Shopify shop domain.
///
/// The value must match `^[a-zA-Z0-9][a-zA-Z0-9-]*\.myshopify\.com$` in full.
/// Matching is case-sensitive and the value is kept exactly as given, so a
/// session created for a shop compares equal to the domain the install
/// started with.
///
/// # Serialization
///
/// `ShopDomain` serializes to the domain string and re-validates on
/// deserialization:
///
/// ```rust
/// use shopify_app::ShopDomain;
///
/// let domain = ShopDomain::new("my-store.myshopify.com").unwrap();
/// let json = serde_json::to_string(&domain).unwrap();
/// assert_eq!(json, r#""my-store.myshopify.com""#);
/// ```
///
/// # Example
///
/// ```rust
/// use shopify_app::ShopDomain;
///
/// let domain = ShopDomain::new("my-store.myshopify.com").unwrap();
/// assert_eq!(domain.shop_name(), "my-store");
///
/// assert!(ShopDomain::new("my-store").is_err());
/// assert!(ShopDomain::new("my-store.myshopify.com.evil.com").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShopDomain(String);

impl ShopDomain {
    const SUFFIX: &'static str = ".myshopify.com";

    /// Creates a new validated shop domain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidShopDomain`] unless the whole value
    /// matches the shop domain pattern.
    pub fn new(domain: impl Into<String>) -> Result<Self, ConfigError> {
        let domain = domain.into();
        if !Self::is_valid(&domain) {
            return Err(ConfigError::InvalidShopDomain { domain });
        }
        Ok(Self(domain))
    }

    /// Returns `true` if `domain` is an acceptable shop domain.
    #[must_use]
    pub fn is_valid(domain: &str) -> bool {
        SHOP_DOMAIN_PATTERN.is_match(domain)
    }

    /// Returns the shop name portion of the domain.
    ///
    /// For `my-store.myshopify.com`, this returns `my-store`.
    #[must_use]
    pub fn shop_name(&self) -> &str {
        &self.0[..self.0.len() - Self::SUFFIX.len()]
    }
}

impl AsRef<str> for ShopDomain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShopDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ShopDomain {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ShopDomain {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated host URL for the application.
///
/// OAuth redirect URIs are built by appending a path to this value, so a
/// trailing slash is stripped.
///
/// # Example
///
/// ```rust
/// use shopify_app::HostUrl;
///
/// let url = HostUrl::new("https://myapp.example.com/").unwrap();
/// assert_eq!(url.as_ref(), "https://myapp.example.com");
/// assert_eq!(url.host_name(), Some("myapp.example.com"));
///
/// // Bare host names, as deployment platforms export them, assume https.
/// let url = HostUrl::from_host_name("myapp.vercel.app").unwrap();
/// assert_eq!(url.as_ref(), "https://myapp.vercel.app");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl HostUrl {
    /// Creates a new validated host URL. The URL must include a scheme.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHostUrl`] if the URL is invalid.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidHostUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidHostUrl { url: url.clone() });
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(ConfigError::InvalidHostUrl { url: url.clone() });
        }

        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(ConfigError::InvalidHostUrl { url: url.clone() });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Creates a host URL from a value that may lack a scheme, assuming `https`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHostUrl`] if the resulting URL is invalid.
    pub fn from_host_name(value: &str) -> Result<Self, ConfigError> {
        let value = value.trim();
        if value.contains("://") {
            Self::new(value)
        } else {
            Self::new(format!("https://{value}"))
        }
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        let host = &self.url[self.host_start..self.host_end];
        if host.is_empty() {
            None
        } else {
            Some(host)
        }
    }
}

impl AsRef<str> for HostUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

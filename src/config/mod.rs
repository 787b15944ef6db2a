//! Configuration for the app.
//!
//! # Overview
//!
//! - [`AppConfig`]: every setting the handlers need, passed explicitly through
//!   router state
//! - [`AppConfigBuilder`]: builder for [`AppConfig`]
//! - [`Environment`]: development or production, which controls cookie flags
//! - Validated newtypes: [`ApiKey`], [`ApiSecretKey`], [`SessionSecret`],
//!   [`ShopDomain`], [`HostUrl`]
//!
//! # Example
//!
//! ```rust
//! use shopify_app::{AppConfig, ApiKey, ApiSecretKey, HostUrl, SessionSecret};
//!
//! let config = AppConfig::builder()
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .api_secret_key(ApiSecretKey::new("my-secret").unwrap())
//!     .session_secret(SessionSecret::new("cookie-secret").unwrap())
//!     .host(HostUrl::new("https://myapp.example.com").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.scopes().to_string(), "read_products,write_products");
//! ```

mod newtypes;

pub use newtypes::{ApiKey, ApiSecretKey, HostUrl, SessionSecret, ShopDomain};

use crate::auth::AuthScopes;
use crate::error::ConfigError;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

/// Scopes requested when none are configured.
pub const DEFAULT_SCOPES: &str = "read_products,write_products";

/// Port the server listens on when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 3000;

/// The deployment environment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Environment {
    /// Local development; cookies are sent over plain HTTP.
    #[default]
    Development,
    /// Production; cookies carry the `Secure` attribute.
    Production,
}

impl Environment {
    /// Returns `true` for [`Environment::Production`].
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "development" | "dev" | "test" | "" => Ok(Self::Development),
            other => Err(ConfigError::InvalidEnvVar {
                name: "APP_ENV",
                reason: format!("unknown environment '{other}'"),
            }),
        }
    }
}

/// Configuration for the app.
///
/// `AppConfig` is immutable once built and is shared with handlers through
/// an `Arc` in the router state.
///
/// # Key Rotation
///
/// Both secrets support rotation. `old_api_secret_key` is tried when an OAuth
/// callback HMAC does not verify with the primary key, and cookies encrypted
/// with `old_session_secret` are still accepted while new cookies are written
/// with `session_secret`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    api_key: ApiKey,
    api_secret_key: ApiSecretKey,
    old_api_secret_key: Option<ApiSecretKey>,
    session_secret: SessionSecret,
    old_session_secret: Option<SessionSecret>,
    scopes: AuthScopes,
    host: HostUrl,
    environment: Environment,
    listen_addr: SocketAddr,
}

impl AppConfig {
    /// Creates a new builder for constructing an `AppConfig`.
    #[must_use]
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::new()
    }

    /// Loads the configuration from the process environment.
    ///
    /// A `.env` file in the working directory is read first if present.
    /// See [`AppConfig::from_lookup`] for the variables consulted.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a required variable is missing or a value
    /// does not validate.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env file");
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from a variable lookup function.
    ///
    /// | Variable | Required | Meaning |
    /// |---|---|---|
    /// | `SHOPIFY_API_KEY` | yes | App client id |
    /// | `SHOPIFY_API_SECRET` | yes | App client secret |
    /// | `SHOPIFY_OLD_API_SECRET` | no | Previous client secret |
    /// | `SESSION_SECRET` | yes | Cookie encryption secret |
    /// | `OLD_SESSION_SECRET` | no | Previous cookie secret |
    /// | `HOST` / `VERCEL_URL` | yes | Public app URL, scheme optional |
    /// | `SCOPES` | no | Comma-separated scopes |
    /// | `APP_ENV` | no | `production` or `development` |
    /// | `BIND_ADDR` / `PORT` | no | Listen address, default `0.0.0.0:3000` |
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a required variable is missing or a value
    /// does not validate.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let require = |name: &'static str| get(name).ok_or(ConfigError::MissingEnvVar { name });

        let host = get("HOST")
            .or_else(|| get("VERCEL_URL"))
            .ok_or(ConfigError::MissingEnvVar { name: "HOST" })?;

        let mut builder = Self::builder()
            .api_key(ApiKey::new(require("SHOPIFY_API_KEY")?)?)
            .api_secret_key(ApiSecretKey::new(require("SHOPIFY_API_SECRET")?)?)
            .session_secret(SessionSecret::new(require("SESSION_SECRET")?)?)
            .host(HostUrl::from_host_name(&host)?);

        if let Some(old) = get("SHOPIFY_OLD_API_SECRET") {
            builder = builder.old_api_secret_key(ApiSecretKey::new(old)?);
        }
        if let Some(old) = get("OLD_SESSION_SECRET") {
            builder = builder.old_session_secret(SessionSecret::new(old)?);
        }
        if let Some(scopes) = get("SCOPES") {
            builder = builder.scopes(scopes.parse()?);
        }
        if let Some(env) = get("APP_ENV") {
            builder = builder.environment(env.parse()?);
        }

        let port = match get("PORT") {
            Some(port) => port.trim().parse::<u16>().map_err(|e| ConfigError::InvalidEnvVar {
                name: "PORT",
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };
        let ip = match get("BIND_ADDR") {
            Some(addr) => addr.trim().parse::<IpAddr>().map_err(|e| ConfigError::InvalidEnvVar {
                name: "BIND_ADDR",
                reason: e.to_string(),
            })?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        builder.listen_addr(SocketAddr::new(ip, port)).build()
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the API secret key.
    #[must_use]
    pub const fn api_secret_key(&self) -> &ApiSecretKey {
        &self.api_secret_key
    }

    /// Returns the old API secret key, if configured.
    #[must_use]
    pub const fn old_api_secret_key(&self) -> Option<&ApiSecretKey> {
        self.old_api_secret_key.as_ref()
    }

    /// Returns the secret new session cookies are encrypted with.
    #[must_use]
    pub const fn session_secret(&self) -> &SessionSecret {
        &self.session_secret
    }

    /// Returns the previous session secret, if configured.
    #[must_use]
    pub const fn old_session_secret(&self) -> Option<&SessionSecret> {
        self.old_session_secret.as_ref()
    }

    /// Returns the OAuth scopes requested at install.
    #[must_use]
    pub const fn scopes(&self) -> &AuthScopes {
        &self.scopes
    }

    /// Returns the public URL of the app.
    #[must_use]
    pub const fn host(&self) -> &HostUrl {
        &self.host
    }

    /// Returns the deployment environment.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    /// Returns the socket address the server binds to.
    #[must_use]
    pub const fn listen_addr(&self) -> SocketAddr {
        self.listen_addr
    }
}

// Verify AppConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AppConfig>();
};

/// Builder for constructing [`AppConfig`] instances.
///
/// Required fields are `api_key`, `api_secret_key`, `session_secret` and
/// `host`.
///
/// # Defaults
///
/// - `scopes`: `read_products,write_products`
/// - `environment`: [`Environment::Development`]
/// - `listen_addr`: `0.0.0.0:3000`
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    api_key: Option<ApiKey>,
    api_secret_key: Option<ApiSecretKey>,
    old_api_secret_key: Option<ApiSecretKey>,
    session_secret: Option<SessionSecret>,
    old_session_secret: Option<SessionSecret>,
    scopes: Option<AuthScopes>,
    host: Option<HostUrl>,
    environment: Option<Environment>,
    listen_addr: Option<SocketAddr>,
}

impl AppConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the API secret key (required).
    #[must_use]
    pub fn api_secret_key(mut self, key: ApiSecretKey) -> Self {
        self.api_secret_key = Some(key);
        self
    }

    /// Sets the previous API secret key, accepted for callback HMACs.
    #[must_use]
    pub fn old_api_secret_key(mut self, key: ApiSecretKey) -> Self {
        self.old_api_secret_key = Some(key);
        self
    }

    /// Sets the session cookie secret (required).
    #[must_use]
    pub fn session_secret(mut self, secret: SessionSecret) -> Self {
        self.session_secret = Some(secret);
        self
    }

    /// Sets the previous session cookie secret, accepted when decoding.
    #[must_use]
    pub fn old_session_secret(mut self, secret: SessionSecret) -> Self {
        self.old_session_secret = Some(secret);
        self
    }

    /// Sets the OAuth scopes.
    #[must_use]
    pub fn scopes(mut self, scopes: AuthScopes) -> Self {
        self.scopes = Some(scopes);
        self
    }

    /// Sets the public app URL (required).
    #[must_use]
    pub fn host(mut self, host: HostUrl) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the deployment environment.
    #[must_use]
    pub const fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Sets the listen address.
    #[must_use]
    pub const fn listen_addr(mut self, addr: SocketAddr) -> Self {
        self.listen_addr = Some(addr);
        self
    }

    /// Builds the [`AppConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] naming the first unset
    /// required field.
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;
        let api_secret_key = self
            .api_secret_key
            .ok_or(ConfigError::MissingRequiredField {
                field: "api_secret_key",
            })?;
        let session_secret = self
            .session_secret
            .ok_or(ConfigError::MissingRequiredField {
                field: "session_secret",
            })?;
        let host = self
            .host
            .ok_or(ConfigError::MissingRequiredField { field: "host" })?;

        let scopes = match self.scopes {
            Some(scopes) => scopes,
            None => DEFAULT_SCOPES.parse()?,
        };

        Ok(AppConfig {
            api_key,
            api_secret_key,
            old_api_secret_key: self.old_api_secret_key,
            session_secret,
            old_session_secret: self.old_session_secret,
            scopes,
            host,
            environment: self.environment.unwrap_or_default(),
            listen_addr: self.listen_addr.unwrap_or_else(|| {
                SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT)
            }),
        })
    }
}

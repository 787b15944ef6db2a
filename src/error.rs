//! Error types for app configuration.
//!
//! All configuration constructors return `Result<T, ConfigError>` so that a
//! misconfigured process fails at startup rather than on the first request.
//!
//! # Example
//!
//! ```rust
//! use shopify_app::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur while building or loading an [`AppConfig`](crate::AppConfig).
///
/// Each variant carries a message meant for the operator starting the app.
/// `InvalidShopDomain` is also produced at request time when the `shop`
/// parameter of an install request is malformed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid Shopify API key.")]
    EmptyApiKey,

    /// API secret key cannot be empty.
    #[error("API secret key cannot be empty. Please provide a valid Shopify API secret key.")]
    EmptyApiSecretKey,

    /// Session secret cannot be empty.
    #[error("Session secret cannot be empty. Please set SESSION_SECRET.")]
    EmptySessionSecret,

    /// Shop domain is invalid.
    #[error("Invalid shop domain '{domain}'. Expected format: 'shop-name.myshopify.com'.")]
    InvalidShopDomain {
        /// The invalid domain that was provided.
        domain: String,
    },

    /// Scopes are invalid.
    #[error("Invalid scopes: {reason}")]
    InvalidScopes {
        /// The reason the scopes are invalid.
        reason: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Host URL is invalid.
    #[error("Invalid host URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://myapp.example.com').")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required environment variable is not set.
    #[error("Missing environment variable '{name}'.")]
    MissingEnvVar {
        /// The variable name.
        name: &'static str,
    },

    /// An environment variable is set but cannot be parsed.
    #[error("Invalid value for environment variable '{name}': {reason}")]
    InvalidEnvVar {
        /// The variable name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

//! OAuth-specific error types.
//!
//! Every variant ends the same way for the user, with a redirect back to the
//! install page tagged `error=auth_failed`. The variants exist so operators
//! can tell from the logs why an install failed.
//!
//! # Example
//!
//! ```rust
//! use shopify_app::auth::oauth::OAuthError;
//!
//! let error = OAuthError::InvalidHmac;
//! assert_eq!(error.to_string(), "HMAC signature validation failed");
//! ```

use thiserror::Error;

/// Errors that can occur while completing the OAuth authorization code flow.
#[derive(Debug, Error)]
pub enum OAuthError {
    /// HMAC signature validation failed.
    ///
    /// The callback's `hmac` does not match the signature computed with the
    /// API secret key (or the old key, when one is configured).
    #[error("HMAC signature validation failed")]
    InvalidHmac,

    /// The browser did not present the state cookie set when the flow began.
    #[error("OAuth state cookie is missing")]
    MissingState,

    /// OAuth state parameter mismatch.
    ///
    /// Only the value the browser sent is kept. The stored nonce stays out of
    /// the message so it never reaches the logs.
    #[error("State parameter mismatch: received '{received}'")]
    StateMismatch {
        /// The state value received in the callback.
        received: String,
    },

    /// Callback parameters are missing or malformed.
    #[error("Invalid callback: {reason}")]
    InvalidCallback {
        /// Description of what's invalid about the callback.
        reason: String,
    },

    /// The token endpoint rejected the exchange or could not be reached.
    ///
    /// `status` is `0` when no HTTP response was received.
    #[error("Token exchange failed with status {status}: {message}")]
    TokenExchangeFailed {
        /// The HTTP status code returned.
        status: u16,
        /// The error message from the response.
        message: String,
    },
}

// Verify OAuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OAuthError>();
};

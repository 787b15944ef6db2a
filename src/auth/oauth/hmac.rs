//! HMAC validation for Shopify OAuth callbacks.
//!
//! All comparisons are constant-time. Validation falls back to the old API
//! secret when one is configured, so installs that began before a secret
//! rotation still complete.
//!
//! # Example
//!
//! ```rust
//! use shopify_app::auth::oauth::hmac::compute_signature;
//!
//! let signature = compute_signature("code=abc&shop=demo.myshopify.com", "my-api-secret");
//! assert_eq!(signature.len(), 64);
//! assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
//! ```

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::auth::oauth::AuthQuery;
use crate::config::AppConfig;

type HmacSha256 = Hmac<Sha256>;

/// Computes a lowercase hex HMAC-SHA256 of `message` keyed with `secret`.
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn compute_signature(message: &str, secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Performs constant-time comparison of two strings.
#[must_use]
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Validates the `hmac` parameter of an OAuth callback.
///
/// Tries the primary API secret first, then the old one if configured.
#[must_use]
pub fn validate_hmac(query: &AuthQuery, config: &AppConfig) -> bool {
    let received = query.hmac();
    if received.is_empty() {
        return false;
    }
    let signable = query.to_signable_string();

    std::iter::once(config.api_secret_key())
        .chain(config.old_api_secret_key())
        .any(|secret| constant_time_compare(&compute_signature(&signable, secret.as_ref()), received))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiKey, ApiSecretKey, HostUrl, SessionSecret};

    fn config(secret: &str, old_secret: Option<&str>) -> AppConfig {
        let mut builder = AppConfig::builder()
            .api_key(ApiKey::new("test-key").unwrap())
            .api_secret_key(ApiSecretKey::new(secret).unwrap())
            .session_secret(SessionSecret::new("cookie").unwrap())
            .host(HostUrl::new("https://app.example.com").unwrap());
        if let Some(old) = old_secret {
            builder = builder.old_api_secret_key(ApiSecretKey::new(old).unwrap());
        }
        builder.build().unwrap()
    }

    fn query_signed_with(secret: &str) -> AuthQuery {
        let mut query = AuthQuery::default();
        query.set("code", "auth-code");
        query.set("shop", "test-shop.myshopify.com");
        query.set("timestamp", "1234567890");
        query.set("state", "state-value");
        let hmac = compute_signature(&query.to_signable_string(), secret);
        query.set("hmac", hmac);
        query
    }

    #[test]
    fn test_compute_signature_matches_known_value() {
        // HMAC-SHA256("message", "key")
        assert_eq!(
            compute_signature("message", "key"),
            "6e9ef29b75fffc5b7abae527d58fdadb2fe42e7219011976917343065f58ed4a"
        );
    }

    #[test]
    fn test_compute_signature_matches_rfc4231_vector() {
        // RFC 4231 test case 2
        assert_eq!(
            compute_signature("what do ya want for nothing?", "Jefe"),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("abc123", "abc123"));
        assert!(constant_time_compare("", ""));
        assert!(!constant_time_compare("abc123", "abc124"));
        assert!(!constant_time_compare("short", "longer string"));
    }

    #[test]
    fn test_validate_hmac_with_primary_secret() {
        assert!(validate_hmac(&query_signed_with("test-secret"), &config("test-secret", None)));
    }

    #[test]
    fn test_validate_hmac_rejects_wrong_signature() {
        let mut query = query_signed_with("test-secret");
        query.set("hmac", "invalid-hmac");
        assert!(!validate_hmac(&query, &config("test-secret", None)));
    }

    #[test]
    fn test_validate_hmac_rejects_missing_signature() {
        let mut query = AuthQuery::default();
        query.set("shop", "test-shop.myshopify.com");
        assert!(!validate_hmac(&query, &config("test-secret", None)));
    }

    #[test]
    fn test_validate_hmac_rejects_tampered_parameter() {
        let mut query = query_signed_with("test-secret");
        query.set("shop", "other-shop.myshopify.com");
        assert!(!validate_hmac(&query, &config("test-secret", None)));
    }

    #[test]
    fn test_validate_hmac_falls_back_to_old_secret() {
        let config = config("new-secret", Some("old-secret"));
        assert!(validate_hmac(&query_signed_with("old-secret"), &config));
        assert!(!validate_hmac(&query_signed_with("third-secret"), &config));
    }
}

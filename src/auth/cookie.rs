//! Cookie envelope for the session and the OAuth state nonce.
//!
//! Cookie values are encrypted and authenticated (AES-256-GCM via the
//! `cookie` crate's private jar) with a key derived from the configured
//! session secret. A value that fails to decrypt is indistinguishable from a
//! missing cookie.

use crate::auth::Session;
use crate::config::{AppConfig, SessionSecret};
use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use sha2::{Digest, Sha512};
use std::fmt;

/// Name of the cookie holding the encrypted [`Session`].
pub const SESSION_COOKIE_NAME: &str = "shopify_session";

/// Name of the cookie holding the OAuth state nonce between begin and callback.
pub const STATE_COOKIE_NAME: &str = "shopify_app_state";

/// Encodes sessions into, and decodes them out of, private cookies.
///
/// New cookies are always written with the current secret. When an old
/// secret is configured, cookies written with it are still read so that
/// rotating `SESSION_SECRET` does not log every shop out.
///
/// # Example
///
/// ```rust
/// use axum::http::{header, HeaderMap, HeaderValue};
/// use shopify_app::auth::cookie::SessionCodec;
/// use shopify_app::SessionSecret;
///
/// let codec = SessionCodec::new(&SessionSecret::new("secret").unwrap(), None, false);
///
/// let mut headers = HeaderMap::new();
/// headers.insert(header::COOKIE, HeaderValue::from_static("shopify_session=forged"));
/// assert!(codec.decode(&headers).is_none());
/// ```
#[derive(Clone)]
pub struct SessionCodec {
    key: Key,
    old_key: Option<Key>,
    secure: bool,
}

impl SessionCodec {
    /// Creates a codec from the current and optional previous secret.
    ///
    /// `secure` controls the `Secure` attribute on written cookies.
    #[must_use]
    pub fn new(secret: &SessionSecret, old_secret: Option<&SessionSecret>, secure: bool) -> Self {
        Self {
            key: derive_key(secret),
            old_key: old_secret.map(derive_key),
            secure,
        }
    }

    /// Creates a codec from the app configuration.
    ///
    /// Cookies are marked `Secure` in production.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.session_secret(),
            config.old_session_secret(),
            config.environment().is_production(),
        )
    }

    /// Returns an empty-delta jar over the request cookies, keyed with the
    /// current secret.
    #[must_use]
    pub fn jar(&self, headers: &HeaderMap) -> PrivateCookieJar {
        PrivateCookieJar::from_headers(headers, self.key.clone())
    }

    /// Decodes the session cookie from request headers.
    ///
    /// Returns `None` when the cookie is absent, fails authentication under
    /// every configured key, or does not hold a valid session.
    #[must_use]
    pub fn decode(&self, headers: &HeaderMap) -> Option<Session> {
        let value = self.read(headers, SESSION_COOKIE_NAME)?;
        match serde_json::from_str(&value) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::debug!(error = %e, "discarding undecodable session cookie");
                None
            }
        }
    }

    /// Adds the encrypted session cookie to `jar`.
    ///
    /// # Errors
    ///
    /// Returns the serialization error if the session cannot be encoded.
    pub fn encode(
        &self,
        jar: PrivateCookieJar,
        session: &Session,
    ) -> Result<PrivateCookieJar, serde_json::Error> {
        let value = serde_json::to_string(session)?;
        Ok(jar.add(self.cookie(SESSION_COOKIE_NAME, value)))
    }

    /// Reads the OAuth state nonce stored by [`SessionCodec::store_state`].
    #[must_use]
    pub fn state(&self, headers: &HeaderMap) -> Option<String> {
        self.read(headers, STATE_COOKIE_NAME)
    }

    /// Adds the encrypted OAuth state cookie to `jar`.
    #[must_use]
    pub fn store_state(&self, jar: PrivateCookieJar, state: &str) -> PrivateCookieJar {
        jar.add(self.cookie(STATE_COOKIE_NAME, state.to_string()))
    }

    /// Expires the OAuth state cookie.
    #[must_use]
    pub fn clear_state(&self, jar: PrivateCookieJar) -> PrivateCookieJar {
        jar.remove(Cookie::build(STATE_COOKIE_NAME).path("/").build())
    }

    fn read(&self, headers: &HeaderMap, name: &str) -> Option<String> {
        std::iter::once(&self.key)
            .chain(self.old_key.as_ref())
            .find_map(|key| {
                let jar: PrivateCookieJar = PrivateCookieJar::from_headers(headers, key.clone());
                jar.get(name).map(|cookie| cookie.value().to_string())
            })
    }

    fn cookie(&self, name: &'static str, value: String) -> Cookie<'static> {
        Cookie::build((name, value))
            .http_only(true)
            .path("/")
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .build()
    }
}

impl fmt::Debug for SessionCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCodec")
            .field("key", &"*****")
            .field("has_old_key", &self.old_key.is_some())
            .field("secure", &self.secure)
            .finish()
    }
}

/// Stretches an arbitrary-length secret into the 64 bytes a cookie key needs.
fn derive_key(secret: &SessionSecret) -> Key {
    let digest = Sha512::digest(secret.as_ref().as_bytes());
    Key::from(digest.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShopDomain;
    use axum::http::{header, HeaderValue};
    use axum::response::IntoResponse;

    fn secret(value: &str) -> SessionSecret {
        SessionSecret::new(value).unwrap()
    }

    fn session() -> Session {
        let shop = ShopDomain::new("demo.myshopify.com").unwrap();
        Session::new(
            Session::offline_id(&shop),
            shop,
            "shpat_abc".to_string(),
            "read_products,write_products".parse().unwrap(),
            false,
            None,
        )
    }

    /// Turns the jar delta into the `Set-Cookie` values a response would carry.
    fn set_cookies(jar: PrivateCookieJar) -> Vec<String> {
        let response = jar.into_response();
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }

    /// Replays `Set-Cookie` values as a request `Cookie` header.
    fn cookie_header(set_cookies: &[String]) -> HeaderMap {
        let pairs: Vec<&str> = set_cookies
            .iter()
            .map(|c| c.split(';').next().unwrap())
            .collect();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&pairs.join("; ")).unwrap(),
        );
        headers
    }

    #[test]
    fn test_encode_then_decode_yields_same_session() {
        let codec = SessionCodec::new(&secret("s3cr3t"), None, false);
        let jar = codec.encode(codec.jar(&HeaderMap::new()), &session()).unwrap();

        let headers = cookie_header(&set_cookies(jar));

        assert_eq!(codec.decode(&headers), Some(session()));
    }

    #[test]
    fn test_cookie_value_does_not_expose_token() {
        let codec = SessionCodec::new(&secret("s3cr3t"), None, false);
        let jar = codec.encode(codec.jar(&HeaderMap::new()), &session()).unwrap();

        let cookies = set_cookies(jar);
        assert_eq!(cookies.len(), 1);
        assert!(cookies[0].starts_with("shopify_session="));
        assert!(!cookies[0].contains("shpat_abc"));
    }

    #[test]
    fn test_cookie_attributes() {
        let codec = SessionCodec::new(&secret("s3cr3t"), None, false);
        let cookie = &set_cookies(codec.encode(codec.jar(&HeaderMap::new()), &session()).unwrap())[0];
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(!cookie.contains("Secure"));

        let secure = SessionCodec::new(&secret("s3cr3t"), None, true);
        let cookie = &set_cookies(secure.encode(secure.jar(&HeaderMap::new()), &session()).unwrap())[0];
        assert!(cookie.contains("Secure"));
    }

    #[test]
    fn test_decode_with_wrong_secret_is_none() {
        let writer = SessionCodec::new(&secret("secret-a"), None, false);
        let reader = SessionCodec::new(&secret("secret-b"), None, false);
        let jar = writer.encode(writer.jar(&HeaderMap::new()), &session()).unwrap();

        assert!(reader.decode(&cookie_header(&set_cookies(jar))).is_none());
    }

    #[test]
    fn test_decode_accepts_old_secret() {
        let before = SessionCodec::new(&secret("old"), None, false);
        let after = SessionCodec::new(&secret("new"), Some(&secret("old")), false);
        let jar = before.encode(before.jar(&HeaderMap::new()), &session()).unwrap();

        assert_eq!(
            after.decode(&cookie_header(&set_cookies(jar))),
            Some(session())
        );
    }

    #[test]
    fn test_decode_missing_or_tampered_is_none() {
        let codec = SessionCodec::new(&secret("s3cr3t"), None, false);
        assert!(codec.decode(&HeaderMap::new()).is_none());

        let jar = codec.encode(codec.jar(&HeaderMap::new()), &session()).unwrap();
        let mut cookie = set_cookies(jar)[0].split(';').next().unwrap().to_string();
        cookie.pop();
        cookie.push(if cookie.ends_with('A') { 'B' } else { 'A' });
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(&cookie).unwrap());

        assert!(codec.decode(&headers).is_none());
    }

    #[test]
    fn test_state_round_trip_and_clear() {
        let codec = SessionCodec::new(&secret("s3cr3t"), None, false);
        let jar = codec.store_state(codec.jar(&HeaderMap::new()), "nonce123");
        let headers = cookie_header(&set_cookies(jar));

        assert_eq!(codec.state(&headers).as_deref(), Some("nonce123"));
        assert!(codec.decode(&headers).is_none());

        let cleared = set_cookies(codec.clear_state(codec.jar(&headers)));
        assert_eq!(cleared.len(), 1);
        assert!(cleared[0].starts_with("shopify_app_state="));
        assert!(cleared[0].contains("Max-Age=0") || cleared[0].contains("Expires="));
    }

    #[test]
    fn test_debug_masks_key() {
        let codec = SessionCodec::new(&secret("s3cr3t"), None, false);
        let debug = format!("{codec:?}");
        assert!(debug.contains("*****"));
        assert!(!debug.contains("s3cr3t"));
    }
}

//! Helpers shared by the integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderValue, Request, Response};
use axum::response::IntoResponse;
use shopify_app::{
    ApiKey, ApiSecretKey, AppConfig, HostUrl, Session, SessionCodec, SessionSecret, ShopDomain,
};

pub const API_KEY: &str = "test-api-key";
pub const API_SECRET: &str = "test-api-secret";
pub const SESSION_SECRET: &str = "test-session-secret";
pub const SHOP: &str = "demo.myshopify.com";

pub fn config() -> AppConfig {
    AppConfig::builder()
        .api_key(ApiKey::new(API_KEY).unwrap())
        .api_secret_key(ApiSecretKey::new(API_SECRET).unwrap())
        .session_secret(SessionSecret::new(SESSION_SECRET).unwrap())
        .host(HostUrl::new("https://app.example.com").unwrap())
        .build()
        .unwrap()
}

pub fn codec(secret: &str) -> SessionCodec {
    SessionCodec::new(&SessionSecret::new(secret).unwrap(), None, false)
}

pub fn session() -> Session {
    let shop = ShopDomain::new(SHOP).unwrap();
    Session::new(
        Session::offline_id(&shop),
        shop,
        "shpat_test".to_string(),
        "read_products,write_products".parse().unwrap(),
        false,
        None,
    )
}

/// Returns the `name=value` pairs of every `Set-Cookie` header.
pub fn set_cookie_pairs<B>(response: &Response<B>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(';').next())
        .map(|pair| pair.trim().to_string())
        .collect()
}

/// A `Cookie` header value carrying `session` sealed by `codec`.
pub fn session_cookie(codec: &SessionCodec, session: &Session) -> String {
    let jar = codec.encode(codec.jar(&HeaderMap::new()), session).unwrap();
    set_cookie_pairs(&jar.into_response()).join("; ")
}

/// Request headers holding a `Cookie` header.
pub fn cookie_headers(cookie: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
    headers
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_with(uri: &str, headers: &[(header::HeaderName, &str)]) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    for (name, value) in headers {
        builder = builder.header(name, *value);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location<B>(response: &Response<B>) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

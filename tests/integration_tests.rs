//! Integration tests for configuration loading.

use std::collections::HashMap;
use std::net::SocketAddr;

use shopify_app::{
    ApiKey, ApiSecretKey, AppConfig, AuthScopes, ConfigError, Environment, HostUrl, SessionSecret,
    ShopDomain,
};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

const REQUIRED: [(&str, &str); 4] = [
    ("SHOPIFY_API_KEY", "env-key"),
    ("SHOPIFY_API_SECRET", "env-secret"),
    ("SESSION_SECRET", "env-session"),
    ("HOST", "https://app.example.com"),
];

#[test]
fn test_full_workflow_create_newtypes_build_config_access_fields() {
    let scopes: AuthScopes = "read_products, write_orders".parse().unwrap();

    let config = AppConfig::builder()
        .api_key(ApiKey::new("test-api-key").unwrap())
        .api_secret_key(ApiSecretKey::new("test-api-secret").unwrap())
        .session_secret(SessionSecret::new("cookie-secret").unwrap())
        .scopes(scopes)
        .host(HostUrl::new("https://myapp.example.com/").unwrap())
        .environment(Environment::Production)
        .build()
        .unwrap();

    assert_eq!(config.api_key().as_ref(), "test-api-key");
    assert_eq!(config.host().as_ref(), "https://myapp.example.com");
    assert!(config.environment().is_production());
    // write_orders implies read_orders
    assert!(config.scopes().contains("read_orders"));
}

#[test]
fn test_environment_with_required_variables_uses_defaults() {
    let config = AppConfig::from_lookup(lookup(&REQUIRED)).unwrap();

    assert_eq!(config.scopes().to_string(), "read_products,write_products");
    assert_eq!(config.environment(), Environment::Development);
    assert_eq!(config.listen_addr(), "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
    assert!(config.old_api_secret_key().is_none());
    assert!(config.old_session_secret().is_none());
}

#[test]
fn test_environment_optional_variables() {
    let mut vars = REQUIRED.to_vec();
    vars.extend([
        ("SHOPIFY_OLD_API_SECRET", "older-secret"),
        ("OLD_SESSION_SECRET", "older-session"),
        ("SCOPES", "read_orders"),
        ("APP_ENV", "production"),
        ("PORT", "8080"),
        ("BIND_ADDR", "127.0.0.1"),
    ]);

    let config = AppConfig::from_lookup(lookup(&vars)).unwrap();

    assert_eq!(config.old_api_secret_key().unwrap().as_ref(), "older-secret");
    assert!(config.old_session_secret().is_some());
    assert_eq!(config.scopes().to_string(), "read_orders");
    assert!(config.environment().is_production());
    assert_eq!(config.listen_addr(), "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
}

#[test]
fn test_vercel_url_supplies_host_without_scheme() {
    let vars = [
        ("SHOPIFY_API_KEY", "env-key"),
        ("SHOPIFY_API_SECRET", "env-secret"),
        ("SESSION_SECRET", "env-session"),
        ("VERCEL_URL", "my-app.vercel.app"),
    ];

    let config = AppConfig::from_lookup(lookup(&vars)).unwrap();

    assert_eq!(config.host().as_ref(), "https://my-app.vercel.app");
}

#[test]
fn test_missing_required_variables_are_named() {
    for missing in ["SHOPIFY_API_KEY", "SHOPIFY_API_SECRET", "SESSION_SECRET", "HOST"] {
        let vars: Vec<_> = REQUIRED
            .iter()
            .copied()
            .filter(|(name, _)| *name != missing)
            .collect();

        let error = AppConfig::from_lookup(lookup(&vars)).unwrap_err();

        assert!(
            matches!(error, ConfigError::MissingEnvVar { name } if name == missing),
            "expected {missing} to be reported, got {error:?}"
        );
    }
}

#[test]
fn test_invalid_port_is_reported() {
    let mut vars = REQUIRED.to_vec();
    vars.push(("PORT", "not-a-port"));

    let error = AppConfig::from_lookup(lookup(&vars)).unwrap_err();

    assert!(matches!(error, ConfigError::InvalidEnvVar { name: "PORT", .. }));
}

#[test]
fn test_shop_domain_validation_table() {
    let valid = ["foo.myshopify.com", "a.myshopify.com", "my-shop-1.myshopify.com", "Foo.myshopify.com"];
    let invalid = [
        "foo.myshopify.com.evil.com",
        "../etc",
        "",
        "foo",
        "-foo.myshopify.com",
        "foo.MYSHOPIFY.com",
        "foo_bar.myshopify.com",
        "foo.bar.myshopify.com",
        "https://foo.myshopify.com",
        " foo.myshopify.com",
    ];

    for domain in valid {
        assert!(ShopDomain::new(domain).is_ok(), "{domain} should be valid");
    }
    for domain in invalid {
        assert!(
            matches!(ShopDomain::new(domain), Err(ConfigError::InvalidShopDomain { .. })),
            "{domain:?} should be invalid"
        );
    }
}

//! OAuth scope handling.
//!
//! [`AuthScopes`] is the scope list the app asks for at install time and the
//! scope list Shopify reports back in the token response.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A set of OAuth scopes.
///
/// Scopes are kept sorted and deduplicated so the rendered list is stable.
/// A `write_*` scope implies the matching `read_*` scope, and
/// `unauthenticated_write_*` implies `unauthenticated_read_*`; implied scopes
/// are added when parsing.
///
/// # Serialization
///
/// Serializes to the comma-separated form used on the wire:
///
/// ```rust
/// use shopify_app::AuthScopes;
///
/// let scopes: AuthScopes = "write_products".parse().unwrap();
/// assert_eq!(scopes.to_string(), "read_products,write_products");
/// assert_eq!(
///     serde_json::to_string(&scopes).unwrap(),
///     r#""read_products,write_products""#
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AuthScopes {
    scopes: BTreeSet<String>,
}

impl AuthScopes {
    /// Creates an empty scope set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the scope set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Returns `true` if `scope` is part of this set.
    #[must_use]
    pub fn contains(&self, scope: &str) -> bool {
        self.scopes.contains(scope)
    }

    /// Returns an iterator over the scopes in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.scopes.iter().map(String::as_str)
    }

    fn implied_scope(scope: &str) -> Option<String> {
        if let Some(rest) = scope.strip_prefix("unauthenticated_write_") {
            return Some(format!("unauthenticated_read_{rest}"));
        }
        scope.strip_prefix("write_").map(|rest| format!("read_{rest}"))
    }
}

impl FromStr for AuthScopes {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut scopes = BTreeSet::new();

        for scope in s.split(',').map(str::trim).filter(|scope| !scope.is_empty()) {
            if !scope.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(ConfigError::InvalidScopes {
                    reason: format!("Invalid characters in scope: '{scope}'"),
                });
            }
            if let Some(implied) = Self::implied_scope(scope) {
                scopes.insert(implied);
            }
            scopes.insert(scope.to_string());
        }

        Ok(Self { scopes })
    }
}

impl fmt::Display for AuthScopes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for scope in &self.scopes {
            if !first {
                f.write_str(",")?;
            }
            f.write_str(scope)?;
            first = false;
        }
        Ok(())
    }
}

impl Serialize for AuthScopes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AuthScopes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

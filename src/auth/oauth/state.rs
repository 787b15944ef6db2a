//! State parameter for OAuth CSRF protection.

use rand::distributions::Alphanumeric;
use rand::Rng;
use std::fmt;

/// A random nonce sent as the OAuth `state` parameter.
///
/// The same value is stored in an encrypted cookie when the flow begins and
/// compared against the callback's `state`.
///
/// ```rust
/// use shopify_app::auth::oauth::StateParam;
///
/// let state = StateParam::new();
/// assert_eq!(state.as_ref().len(), 15);
/// assert!(state.as_ref().chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateParam(String);

impl StateParam {
    const NONCE_LENGTH: usize = 15;

    /// Generates a fresh nonce from the thread-local CSPRNG.
    #[must_use]
    pub fn new() -> Self {
        let nonce = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(Self::NONCE_LENGTH)
            .map(char::from)
            .collect();
        Self(nonce)
    }
}

impl Default for StateParam {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<str> for StateParam {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

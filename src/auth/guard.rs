//! Session gate for protected pages.
//!
//! Every protected handler takes an [`AuthOutcome`] and branches on it. The
//! outcome is a plain value: an unauthenticated request is a normal result,
//! not an error, and the extractor cannot reject.

use crate::auth::cookie::SessionCodec;
use crate::auth::Session;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use std::convert::Infallible;

/// Result of checking a request for a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The request carries a valid, active session.
    Authenticated(Session),
    /// No usable session; the caller must send the user to the install flow.
    Unauthenticated,
}

impl AuthOutcome {
    /// Returns the session, if authenticated.
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            Self::Unauthenticated => None,
        }
    }

    /// Returns `true` if authenticated.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

/// Checks requests for a valid session cookie.
#[derive(Clone, Copy, Debug)]
pub struct AuthGuard<'a> {
    codec: &'a SessionCodec,
}

impl<'a> AuthGuard<'a> {
    /// Creates a guard that decodes with `codec`.
    #[must_use]
    pub const fn new(codec: &'a SessionCodec) -> Self {
        Self { codec }
    }

    /// Checks the request headers for a session.
    ///
    /// Fails closed: a missing cookie, a cookie sealed with another secret, an
    /// undecodable payload and an expired session all yield
    /// [`AuthOutcome::Unauthenticated`].
    #[must_use]
    pub fn check(&self, headers: &HeaderMap) -> AuthOutcome {
        match self.codec.decode(headers) {
            Some(session) if session.is_active() => AuthOutcome::Authenticated(session),
            Some(session) => {
                tracing::debug!(shop = %session.shop, "session cookie is no longer active");
                AuthOutcome::Unauthenticated
            }
            None => AuthOutcome::Unauthenticated,
        }
    }
}

impl<S> FromRequestParts<S> for AuthOutcome
where
    SessionCodec: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let codec = SessionCodec::from_ref(state);
        Ok(AuthGuard::new(&codec).check(&parts.headers))
    }
}

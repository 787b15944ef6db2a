//! Authentication for the app shell.
//!
//! - [`oauth`]: the install flow, from authorize URL to access token
//! - [`Session`]: the authenticated shop, as carried in the session cookie
//! - [`cookie`]: encryption of the session and OAuth state cookies
//! - [`guard`]: the fail-closed check protected pages run on every request
//! - [`AuthScopes`]: the permission set requested from and granted by Shopify

pub mod cookie;
pub mod guard;
pub mod oauth;
mod scopes;
pub mod session;

pub use cookie::SessionCodec;
pub use guard::{AuthGuard, AuthOutcome};
pub use scopes::AuthScopes;
pub use session::{AccessTokenResponse, Session};

//! Session-related types.
//!
//! The session is the storefront's per-visitor store. It holds the cart
//! and, after a successful login, the opaque session token plus a fixed
//! placeholder identity.

use secrecy::SecretString;

/// Identity recorded for every successful login.
///
/// The authentication API returns only a token, so no real user id is known.
pub const PLACEHOLDER_USER_ID: &str = "nebula-admin";

/// Session-stored login state, read back from the two session keys.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// User identity (always [`PLACEHOLDER_USER_ID`] today).
    pub id: String,
    /// Opaque token issued by the authentication API.
    pub token: SecretString,
}

/// Session keys.
pub mod keys {
    /// Key for the visitor's cart (`CartState`).
    pub const CART: &str = "cart";

    /// Key for the session token issued at login.
    pub const AUTH_TOKEN: &str = "auth_token";

    /// Key for the logged-in user identity.
    pub const USER_ID: &str = "user_id";
}

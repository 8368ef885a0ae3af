//! Clients for services outside the storefront.
//!
//! - `auth` - External authentication API (login)

pub mod auth;

pub use auth::{AuthClient, AuthError, LoginOutcome};

//! Session-held types for the storefront.

pub mod session;

pub use session::{CurrentUser, PLACEHOLDER_USER_ID, keys as session_keys};

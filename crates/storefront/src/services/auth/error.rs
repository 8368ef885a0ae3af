//! Authentication API error types.

use thiserror::Error;

/// Errors talking to the external authentication API.
///
/// A credential rejection is not an error; see
/// [`LoginOutcome::Rejected`](super::LoginOutcome::Rejected).
#[derive(Debug, Error)]
pub enum AuthError {
    /// The request never produced a response (connection refused, DNS, reset).
    #[error("authentication API unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not the expected JSON shape.
    #[error("unexpected authentication response (HTTP {status}): {reason}")]
    InvalidResponse { status: u16, reason: String },

    /// The API reported success but returned no session token.
    #[error("authentication response is missing a session token")]
    MissingToken,
}

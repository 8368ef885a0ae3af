//! Login state extractor and session helpers.
//!
//! Login state is the pair of session keys written after the
//! authentication API accepts a login. Both must be present.

use axum::{extract::FromRequestParts, http::request::Parts};
use secrecy::{ExposeSecret, SecretString};
use tower_sessions::Session;

use crate::models::{CurrentUser, session_keys};

/// Extractor that optionally gets the logged-in user.
///
/// Never rejects; anonymous visitors get `OptionalAuth(None)`.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
///     match user {
///         Some(u) => format!("Signed in as {}", u.id),
///         None => "Guest".to_string(),
///     }
/// }
/// ```
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(session) = parts.extensions.get::<Session>() else {
            return Ok(Self(None));
        };
        Ok(Self(load_current_user(session).await))
    }
}

/// Read the login state from the session.
pub async fn load_current_user(session: &Session) -> Option<CurrentUser> {
    let token = session
        .get::<String>(session_keys::AUTH_TOKEN)
        .await
        .ok()
        .flatten()?;
    let id = session
        .get::<String>(session_keys::USER_ID)
        .await
        .ok()
        .flatten()?;
    Some(CurrentUser {
        id,
        token: SecretString::from(token),
    })
}

/// Record a successful login in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user_id: &str,
    token: &SecretString,
) -> Result<(), tower_sessions::session::Error> {
    // New privilege level, new session id
    session.cycle_id().await?;
    session
        .insert(session_keys::AUTH_TOKEN, token.expose_secret())
        .await?;
    session.insert(session_keys::USER_ID, user_id).await
}

/// Clear the login state from the session (logout).
///
/// The cart is kept.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<String>(session_keys::AUTH_TOKEN).await?;
    session.remove::<String>(session_keys::USER_ID).await?;
    Ok(())
}

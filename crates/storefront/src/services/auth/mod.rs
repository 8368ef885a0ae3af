//! Client for the external authentication API.
//!
//! The storefront does not issue or validate credentials itself. It posts
//! `{email, password}` to `POST {auth_api_url}/login` and interprets the
//! `{success, message, data: {tokens}}` reply. There is no retry, refresh or
//! expiry handling.

mod error;

pub use error::AuthError;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use url::Url;

use nebula_core::Email;

use crate::config::AuthApiConfig;

/// Message shown when the API rejects credentials without saying why.
const DEFAULT_REJECTION_MESSAGE: &str = "Login failed";

/// Result of a login attempt that reached the API.
#[derive(Debug)]
pub enum LoginOutcome {
    /// Credentials accepted; carries the opaque session token.
    Authenticated(SecretString),
    /// Credentials refused; carries the server's message verbatim.
    Rejected { message: String },
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<LoginData>,
}

#[derive(Debug, Deserialize)]
struct LoginData {
    #[serde(default)]
    tokens: Option<String>,
}

/// Authentication API client.
#[derive(Clone)]
pub struct AuthClient {
    client: reqwest::Client,
    login_url: Url,
}

impl AuthClient {
    /// Create a new client for the configured API.
    #[must_use]
    pub fn new(config: &AuthApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            login_url: config.login_url(),
        }
    }

    /// The endpoint credentials are posted to.
    #[must_use]
    pub const fn login_url(&self) -> &Url {
        &self.login_url
    }

    /// Submit credentials.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Transport` if the API cannot be reached, or
    /// another `AuthError` if its reply cannot be understood.
    #[instrument(skip(self, email, password), fields(email = %email, url = %self.login_url))]
    pub async fn login(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<LoginOutcome, AuthError> {
        let response = self
            .client
            .post(self.login_url.clone())
            .json(&LoginRequest {
                email: email.as_str(),
                password: password.expose_secret(),
            })
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        interpret_response(status, &body)
    }
}

/// Map an API reply onto a [`LoginOutcome`].
///
/// The body decides the outcome regardless of HTTP status, so an error
/// payload on a 401 still yields `Rejected` with its message.
fn interpret_response(status: u16, body: &str) -> Result<LoginOutcome, AuthError> {
    let parsed: LoginResponse =
        serde_json::from_str(body).map_err(|e| AuthError::InvalidResponse {
            status,
            reason: e.to_string(),
        })?;

    if !parsed.success {
        let message = parsed
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_REJECTION_MESSAGE.to_string());
        return Ok(LoginOutcome::Rejected { message });
    }

    parsed
        .data
        .and_then(|data| data.tokens)
        .filter(|token| !token.is_empty())
        .map(|token| LoginOutcome::Authenticated(SecretString::from(token)))
        .ok_or(AuthError::MissingToken)
}

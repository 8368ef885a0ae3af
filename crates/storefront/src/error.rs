//! Storefront error type and Sentry helpers.
//!
//! Handlers return [`Result`]. Faults on our side (session store, auth API)
//! are reported to Sentry and logged; the visitor only sees a short
//! status line. Client mistakes such as an unknown product are not reported.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::services::auth::AuthError;

#[derive(Debug, Error)]
pub enum AppError {
    /// The authentication API was unreachable or answered nonsense.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Session store read or write failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Auth(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Body text shown to the visitor.
    fn public_message(&self) -> String {
        match self {
            Self::Auth(_) => "Authentication service unavailable".to_string(),
            Self::Session(_) => "Internal server error".to_string(),
            Self::NotFound(_) => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(error = %self, sentry_event_id = %event_id, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        (status, self.public_message()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Attach the signed-in identity to subsequent Sentry events.
pub fn set_sentry_user(identity: &str, email: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(identity.to_string()),
            email: Some(email.to_string()),
            ..Default::default()
        }));
    });
}

pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| scope.set_user(None));
}

/// Record a visitor action so it shows up in the trail of later Sentry reports.
pub fn add_breadcrumb(category: &str, message: &str, data: &[(&str, &str)]) {
    let data = data
        .iter()
        .map(|&(key, value)| (key.to_string(), serde_json::Value::from(value)))
        .collect();

    sentry::add_breadcrumb(sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        data,
        ..Default::default()
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_is_public() {
        let err = AppError::NotFound("product 99".to_string());
        assert_eq!(err.to_string(), "Not found: product 99");
        assert_eq!(err.public_message(), "Not found: product 99");
    }

    #[test]
    fn test_auth_failure_hides_details() {
        let err = AppError::Auth(AuthError::MissingToken);
        assert_eq!(err.public_message(), "Authentication service unavailable");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::NotFound("x".to_string()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Auth(AuthError::MissingToken)
                .into_response()
                .status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}

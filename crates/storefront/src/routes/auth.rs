//! Authentication route handlers.
//!
//! Credentials are checked by the external authentication API. On success
//! the session token and the placeholder identity are stored in the
//! session and the visitor is sent to the dashboard.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use nebula_core::Email;

use super::{Chrome, Section};
use crate::error::{Result, add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::PLACEHOLDER_USER_ID;
use crate::services::LoginOutcome;
use crate::state::AppState;

/// Shown for any failure to get an answer from the authentication API.
pub const OFFLINE_MESSAGE: &str = "The authentication server is offline. Please try again later.";

const INVALID_EMAIL_MESSAGE: &str = "Enter a valid email address.";
const MISSING_PASSWORD_MESSAGE: &str = "Access key is required.";

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub chrome: Chrome,
    pub error: Option<String>,
    pub email: String,
}

/// Display login page.
#[instrument(skip(session))]
pub async fn login_page(session: Session) -> Result<LoginTemplate> {
    Ok(LoginTemplate {
        chrome: Chrome::load(&session, Section::Login, "/login").await?,
        error: None,
        email: String::new(),
    })
}

/// Handle login form submission.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let LoginForm { email, password } = form;
    let password = SecretString::from(password);

    let Ok(email) = Email::parse(&email) else {
        return render_error(
            &session,
            StatusCode::BAD_REQUEST,
            INVALID_EMAIL_MESSAGE,
            &email,
        )
        .await;
    };

    if password.expose_secret().is_empty() {
        return render_error(
            &session,
            StatusCode::BAD_REQUEST,
            MISSING_PASSWORD_MESSAGE,
            email.as_str(),
        )
        .await;
    }

    match state.auth().login(&email, &password).await {
        Ok(LoginOutcome::Authenticated(token)) => {
            set_current_user(&session, PLACEHOLDER_USER_ID, &token).await?;
            set_sentry_user(PLACEHOLDER_USER_ID, email.as_str());
            add_breadcrumb("auth", "Signed in", &[]);
            tracing::info!("Login accepted");
            Ok(Redirect::to("/dashboard").into_response())
        }
        Ok(LoginOutcome::Rejected { message }) => {
            tracing::info!(%message, "Login rejected");
            render_error(&session, StatusCode::UNAUTHORIZED, &message, email.as_str()).await
        }
        Err(e) => {
            // Details stay in the logs; the visitor only sees the offline notice
            tracing::error!(error = %e, "Authentication API call failed");
            render_error(
                &session,
                StatusCode::SERVICE_UNAVAILABLE,
                OFFLINE_MESSAGE,
                email.as_str(),
            )
            .await
        }
    }
}

/// Re-render the login form with an error and the submitted email.
async fn render_error(
    session: &Session,
    status: StatusCode,
    message: &str,
    email: &str,
) -> Result<Response> {
    let template = LoginTemplate {
        chrome: Chrome::load(session, Section::Login, "/login").await?,
        error: Some(message.to_string()),
        email: email.to_string(),
    };
    Ok((status, template).into_response())
}

/// Handle logout.
///
/// Clears the login keys only; the cart survives.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_current_user(&session).await?;
    clear_sentry_user();
    add_breadcrumb("auth", "Signed out", &[]);
    Ok(Redirect::to("/login"))
}

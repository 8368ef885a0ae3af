//! Contact form route handler.
//!
//! Inquiries are validated and logged; there is no mail delivery.

use axum::{Form, response::Redirect};
use serde::Deserialize;
use tracing::instrument;

use nebula_core::Email;

/// Redirect target after an accepted inquiry.
pub const CONTACT_SENT: &str = "/?contact=sent#contact";

/// Redirect target after a rejected inquiry.
pub const CONTACT_INVALID: &str = "/?contact=invalid#contact";

/// Contact form data.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

/// A validated inquiry.
#[derive(Debug, PartialEq, Eq)]
pub struct Inquiry {
    pub name: String,
    pub email: Email,
    pub message: String,
}

impl ContactForm {
    /// Validate the form. Name and message must be non-blank.
    #[must_use]
    pub fn validate(&self) -> Option<Inquiry> {
        let name = self.name.trim();
        let message = self.message.trim();
        if name.is_empty() || message.is_empty() {
            return None;
        }
        let email = Email::parse(&self.email).ok()?;
        Some(Inquiry {
            name: name.to_string(),
            email,
            message: message.to_string(),
        })
    }
}

/// Submit the contact form.
///
/// POST /contact
#[instrument(skip(form))]
pub async fn submit(Form(form): Form<ContactForm>) -> Redirect {
    match form.validate() {
        Some(inquiry) => {
            tracing::info!(
                name = %inquiry.name,
                email = %inquiry.email,
                length = inquiry.message.len(),
                "Contact inquiry received"
            );
            Redirect::to(CONTACT_SENT)
        }
        None => {
            tracing::debug!("Rejected contact form submission");
            Redirect::to(CONTACT_INVALID)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_valid_inquiry_is_trimmed() {
        let inquiry = form("  Ada ", "Ada@Nebula.Tech", " Custom rig ").validate();
        let inquiry = inquiry.as_ref();
        assert_eq!(inquiry.map(|i| i.name.as_str()), Some("Ada"));
        assert_eq!(inquiry.map(|i| i.email.as_str()), Some("Ada@Nebula.Tech"));
        assert_eq!(inquiry.map(|i| i.message.as_str()), Some("Custom rig"));
    }

    #[test]
    fn test_invalid_inquiries() {
        assert!(form("", "ada@nebula.tech", "hi").validate().is_none());
        assert!(form("Ada", "not-an-email", "hi").validate().is_none());
        assert!(form("Ada", "ada@nebula.tech", "   ").validate().is_none());
    }
}

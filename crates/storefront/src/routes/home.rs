//! Landing page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::Query;
use nebula_core::Price;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::{Chrome, Section, whole_dollars};
use crate::error::Result;
use crate::filters;

// =============================================================================
// Static Content
// =============================================================================

/// A featured product on the landing page.
#[derive(Clone, Debug)]
pub struct Showcase {
    pub name: &'static str,
    pub category: &'static str,
    pub price: Price,
    pub image_url: &'static str,
}

impl Showcase {
    #[must_use]
    pub fn display_price(&self) -> String {
        whole_dollars(self.price)
    }
}

/// A partner logo in the logo strip.
#[derive(Clone, Debug)]
pub struct Logo {
    pub name: &'static str,
    pub url: &'static str,
}

/// Featured hardware, one per landing section.
pub static SHOWCASE: [Showcase; 4] = [
    Showcase {
        name: "Nebula Core X",
        category: "Processors",
        price: Price::from_dollars(2400),
        image_url: "https://images.unsplash.com/photo-1591405351990-4726e331f141?auto=format&fit=crop&q=80&w=1000",
    },
    Showcase {
        name: "Aether Lens",
        category: "Optics",
        price: Price::from_dollars(890),
        image_url: "https://media.istockphoto.com/id/1338477122/photo/black-friday-concept.webp?a=1&b=1&s=612x612&w=0&k=20&c=KaLCgyPxVB3TEHpqeKumXhefU3qgaxvLHvConHpgQ98=",
    },
    Showcase {
        name: "Void Drive",
        category: "Storage",
        price: Price::from_dollars(1200),
        image_url: "https://images.unsplash.com/photo-1701056035604-6a7dd0efa0d7?q=80&w=1170&auto=format&fit=crop",
    },
    Showcase {
        name: "Pulse Monitor",
        category: "Biometrics",
        price: Price::from_dollars(450),
        image_url: "https://images.unsplash.com/photo-1555664424-778a1e5e1b48?auto=format&fit=crop&q=80&w=1000",
    },
];

/// "The Drop" limited-supply grid.
pub static DROP: [Showcase; 3] = [
    Showcase {
        name: "Element 01",
        category: "Limited Supply",
        price: Price::from_dollars(190),
        image_url: "https://images.unsplash.com/photo-1550745165-9bc0b252726f?q=80&w=800",
    },
    Showcase {
        name: "Vortex Unit",
        category: "Limited Supply",
        price: Price::from_dollars(340),
        image_url: "https://images.unsplash.com/photo-1581091226825-a6a2a5aee158?q=80&w=800",
    },
    Showcase {
        name: "Aether Shell",
        category: "Limited Supply",
        price: Price::from_dollars(520),
        image_url: "https://images.unsplash.com/photo-1531297484001-80022131f5a1?q=80&w=800",
    },
];

pub static LOGOS: [Logo; 6] = [
    Logo {
        name: "NVIDIA",
        url: "https://upload.wikimedia.org/wikipedia/sco/2/21/Nvidia_logo.svg",
    },
    Logo {
        name: "GitHub",
        url: "https://upload.wikimedia.org/wikipedia/commons/9/91/Octicons-mark-github.svg",
    },
    Logo {
        name: "Nike",
        url: "https://upload.wikimedia.org/wikipedia/commons/a/a6/Logo_NIKE.svg",
    },
    Logo {
        name: "OpenAI",
        url: "https://upload.wikimedia.org/wikipedia/commons/4/4d/OpenAI_Logo.svg",
    },
    Logo {
        name: "Tailwind CSS",
        url: "https://upload.wikimedia.org/wikipedia/commons/d/d5/Tailwind_CSS_Logo.svg",
    },
    Logo {
        name: "Vercel",
        url: "https://upload.wikimedia.org/wikipedia/commons/5/5e/Vercel_logo_black.svg",
    },
];

// =============================================================================
// Handler
// =============================================================================

/// Outcome of a contact form post, carried back in the query string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactStatus {
    Sent,
    Invalid,
}

impl ContactStatus {
    fn from_query(raw: &str) -> Option<Self> {
        match raw {
            "sent" => Some(Self::Sent),
            "invalid" => Some(Self::Invalid),
            _ => None,
        }
    }

    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Sent => "Message received. Welcome to the void.",
            Self::Invalid => "Transmission failed. Name, a valid email and a message are required.",
        }
    }

    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(self, Self::Invalid)
    }
}

/// Landing page query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    pub contact: Option<String>,
}

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub chrome: Chrome,
    pub showcase: &'static [Showcase],
    pub drop: &'static [Showcase],
    pub logos: &'static [Logo],
    pub contact: Option<ContactStatus>,
}

/// Display the landing page.
#[instrument(skip(session))]
pub async fn home(session: Session, Query(query): Query<HomeQuery>) -> Result<HomeTemplate> {
    Ok(HomeTemplate {
        chrome: Chrome::load(&session, Section::Home, "/").await?,
        showcase: &SHOWCASE,
        drop: &DROP,
        logos: &LOGOS,
        contact: query.contact.as_deref().and_then(ContactStatus::from_query),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_showcase_prices_render_whole_dollars() {
        let prices: Vec<String> = SHOWCASE.iter().map(Showcase::display_price).collect();
        assert_eq!(prices, ["$2,400", "$890", "$1,200", "$450"]);
        let first_drop = DROP.first().map(Showcase::display_price);
        assert_eq!(first_drop.as_deref(), Some("$190"));
    }

    #[test]
    fn test_contact_status_from_query() {
        assert_eq!(ContactStatus::from_query("sent"), Some(ContactStatus::Sent));
        assert_eq!(
            ContactStatus::from_query("invalid"),
            Some(ContactStatus::Invalid)
        );
        assert_eq!(ContactStatus::from_query("other"), None);
        assert_eq!(
            ContactStatus::Sent.message(),
            "Message received. Welcome to the void."
        );
    }
}

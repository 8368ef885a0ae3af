//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Landing page
//! POST /contact                - Contact form (redirects back to /#contact)
//! GET  /explore                - Catalog (?category=&page=)
//!
//! # Cart (HTMX fragments or 303 redirects)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add one unit (opens the panel)
//! POST /cart/update            - Change quantity by a delta (floor of 1)
//! POST /cart/remove            - Remove a line
//! POST /cart/open              - Show or hide the cart panel
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Auth
//! GET  /login                  - Login page
//! POST /login                  - Login action (rate limited)
//! POST /logout                 - Logout action
//!
//! # Admin
//! GET  /dashboard              - Dashboard (?tab=overview|inventory|orders|customers)
//! ```

pub mod auth;
pub mod cart;
pub mod contact;
pub mod dashboard;
pub mod explore;
pub mod home;

use axum::{
    Router,
    http::HeaderMap,
    routing::{get, post},
};
use nebula_core::Price;
use tower_sessions::Session;

use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::middleware::{auth::load_current_user, login_rate_limiter};
use crate::state::AppState;

use self::cart::{CartView, load_cart};

/// Price text without a zero cents suffix: `$2,400.00` renders as `$2,400`.
#[must_use]
pub fn whole_dollars(price: Price) -> String {
    let text = price.to_string();
    match text.strip_suffix(".00") {
        Some(whole) => whole.to_string(),
        None => text,
    }
}

/// Header set by HTMX (and `static/js/nebula.js`) on fragment requests.
pub const HX_REQUEST: &str = "hx-request";

/// Whether the request wants a fragment rather than a full page.
#[must_use]
pub fn is_fragment_request(headers: &HeaderMap) -> bool {
    headers
        .get(HX_REQUEST)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

/// Navigation section highlighted in the top bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Home,
    Explore,
    Cart,
    Login,
    Dashboard,
}

impl Section {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Explore => "explore",
            Self::Cart => "cart",
            Self::Login => "login",
            Self::Dashboard => "dashboard",
        }
    }
}

/// Shared page chrome: navigation bar state and the cart panel.
#[derive(Clone)]
pub struct Chrome {
    pub section: Section,
    pub signed_in: bool,
    pub cart: CartView,
    /// Path the cart panel forms return to for non-HTMX posts
    pub return_to: String,
}

impl Chrome {
    /// Build the chrome for a page from the visitor's session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read.
    pub async fn load(session: &Session, section: Section, return_to: &str) -> Result<Self> {
        let cart = load_cart(session).await?;
        let signed_in = load_current_user(session).await.is_some();
        Ok(Self {
            section,
            signed_in,
            cart: CartView::from(&cart),
            return_to: return_to.to_string(),
        })
    }

    /// The dashboard renders its own sidebar instead of the shared nav.
    #[must_use]
    pub fn show_nav(&self) -> bool {
        self.section != Section::Dashboard
    }

    /// Whether the named nav link is the current section.
    #[must_use]
    pub fn active(&self, name: &str) -> bool {
        self.section.name() == name
    }
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/open", post(cart::open))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes(config: &StorefrontConfig) -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/contact", post(contact::submit))
        .route("/explore", get(explore::explore))
        .nest("/cart", cart_routes())
        .route(
            "/login",
            get(auth::login_page)
                .merge(post(auth::login).layer(login_rate_limiter(&config.trusted_proxies))),
        )
        .route("/logout", post(auth::logout))
        .route("/dashboard", get(dashboard::dashboard))
}

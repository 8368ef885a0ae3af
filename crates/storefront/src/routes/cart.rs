//! Cart route handlers.
//!
//! The cart lives in the visitor's session under `session_keys::CART`.
//! Each handler loads it, applies one operation and saves it back.
//! HTMX requests get the cart panel fragment plus a `cart-updated`
//! trigger; plain form posts are redirected back to `return_to`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use nebula_core::{CartLine, CartState, ProductId};

use super::{Chrome, Section, is_fragment_request};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::models::session_keys;
use crate::state::AppState;

/// Where cart forms land when no usable `return_to` was posted.
pub const DEFAULT_RETURN_TO: &str = "/explore";

/// Cart line display data for templates.
#[derive(Clone, Debug)]
pub struct CartItemView {
    pub id: u32,
    pub name: String,
    pub category: String,
    pub image_url: String,
    pub quantity: u32,
    pub unit_price: String,
    pub subtotal: String,
}

/// Cart display data for templates.
#[derive(Clone, Debug)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u64,
    pub is_open: bool,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        let product = line.product();
        Self {
            id: product.id.as_u32(),
            name: product.name.clone(),
            category: product.category.clone(),
            image_url: product.image_url.clone(),
            quantity: line.quantity(),
            unit_price: product.price.to_string(),
            subtotal: line.subtotal().to_string(),
        }
    }
}

impl From<&CartState> for CartView {
    fn from(cart: &CartState) -> Self {
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            total: cart.total().to_string(),
            item_count: cart.total_items(),
            is_open: cart.is_open(),
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the visitor's cart, or an empty one.
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn load_cart(session: &Session) -> Result<CartState> {
    Ok(session
        .get::<CartState>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Save the visitor's cart.
///
/// # Errors
///
/// Returns an error if the session store cannot be written.
pub async fn save_cart(session: &Session, cart: &CartState) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

/// Accept only same-site absolute paths as redirect targets.
#[must_use]
pub fn safe_return_to(raw: Option<&str>) -> String {
    raw.map(str::trim)
        .filter(|path| {
            path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.chars().any(char::is_control)
        })
        .unwrap_or(DEFAULT_RETURN_TO)
        .to_string()
}

// =============================================================================
// Forms
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
    #[serde(default)]
    pub return_to: Option<String>,
}

/// Update quantity form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    pub delta: i64,
    #[serde(default)]
    pub return_to: Option<String>,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: ProductId,
    #[serde(default)]
    pub return_to: Option<String>,
}

/// Show or hide the cart panel.
#[derive(Debug, Deserialize)]
pub struct OpenCartForm {
    pub open: bool,
    #[serde(default)]
    pub return_to: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub chrome: Chrome,
}

/// Cart panel fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_panel.html")]
pub struct CartPanelTemplate {
    pub chrome: Chrome,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

/// Answer a cart mutation with a fragment or a redirect.
fn respond(headers: &HeaderMap, cart: &CartState, return_to: Option<&str>) -> Response {
    let return_to = safe_return_to(return_to);

    if is_fragment_request(headers) {
        let chrome = Chrome {
            section: Section::Cart,
            signed_in: false,
            cart: CartView::from(cart),
            return_to,
        };
        (
            AppendHeaders([("HX-Trigger", "cart-updated")]),
            CartPanelTemplate { chrome },
        )
            .into_response()
    } else {
        Redirect::to(&return_to).into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<CartShowTemplate> {
    let chrome = Chrome::load(&session, Section::Cart, "/cart").await?;
    Ok(CartShowTemplate { chrome })
}

/// Add one unit of a catalog product and open the panel.
///
/// Unknown product ids are rejected with 404.
#[instrument(skip(state, session, headers), fields(product_id = %form.product_id))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let product = state
        .catalog()
        .find(form.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;

    let mut cart = load_cart(&session).await?;
    cart.add(product);
    save_cart(&session, &cart).await?;

    let product_id = form.product_id.to_string();
    add_breadcrumb("cart", "Added to cart", &[("product_id", product_id.as_str())]);
    tracing::debug!(total_items = cart.total_items(), "Cart updated");

    Ok(respond(&headers, &cart, form.return_to.as_deref()))
}

/// Change a line's quantity by `delta`, never below 1.
///
/// Unknown product ids leave the cart untouched.
#[instrument(skip(session, headers), fields(product_id = %form.product_id, delta = form.delta))]
pub async fn update(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let mut cart = load_cart(&session).await?;
    if cart.update_quantity(form.product_id, form.delta).is_some() {
        save_cart(&session, &cart).await?;
    }
    Ok(respond(&headers, &cart, form.return_to.as_deref()))
}

/// Remove a line from the cart.
///
/// Unknown product ids leave the cart untouched.
#[instrument(skip(session, headers), fields(product_id = %form.product_id))]
pub async fn remove(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let mut cart = load_cart(&session).await?;
    if cart.remove(form.product_id) {
        save_cart(&session, &cart).await?;
        let product_id = form.product_id.to_string();
        add_breadcrumb("cart", "Removed from cart", &[("product_id", product_id.as_str())]);
    }
    Ok(respond(&headers, &cart, form.return_to.as_deref()))
}

/// Show or hide the cart panel.
#[instrument(skip(session, headers), fields(open = form.open))]
pub async fn open(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<OpenCartForm>,
) -> Result<Response> {
    let mut cart = load_cart(&session).await?;
    cart.set_open(form.open);
    save_cart(&session, &cart).await?;
    Ok(respond(&headers, &cart, form.return_to.as_deref()))
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<CartCountTemplate> {
    let cart = load_cart(&session).await?;
    Ok(CartCountTemplate {
        count: cart.total_items(),
    })
}

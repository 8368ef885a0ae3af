//! Catalog exploration page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use nebula_core::Product;
use nebula_core::catalog::ALL_CATEGORIES;

use super::{Chrome, Section};
use crate::error::Result;
use crate::filters;
use crate::state::AppState;

/// Explore query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ExploreQuery {
    pub category: Option<String>,
    pub page: Option<usize>,
}

/// Product card display data.
#[derive(Clone, Debug)]
pub struct ProductCard {
    pub id: u32,
    pub name: String,
    pub category: String,
    pub price: String,
    pub image_url: String,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_u32(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price.to_string(),
            image_url: product.image_url.clone(),
        }
    }
}

/// A filter bar button.
#[derive(Clone, Debug)]
pub struct CategoryLink {
    pub label: String,
    pub href: String,
    pub active: bool,
}

/// A pagination button.
#[derive(Clone, Debug)]
pub struct PageLink {
    pub number: usize,
    pub href: String,
    pub active: bool,
}

/// Explore page template.
#[derive(Template, WebTemplate)]
#[template(path = "explore.html")]
pub struct ExploreTemplate {
    pub chrome: Chrome,
    pub categories: Vec<CategoryLink>,
    pub products: Vec<ProductCard>,
    pub pages: Vec<PageLink>,
    pub total_items: usize,
}

/// Link to a category and page of the explore view.
///
/// Page 1 of `All` is the bare `/explore` path.
#[must_use]
pub fn explore_href(category: &str, page: usize) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    if category != ALL_CATEGORIES {
        query.append_pair("category", category);
    }
    if page > 1 {
        query.append_pair("page", &page.to_string());
    }
    let query = query.finish();

    if query.is_empty() {
        "/explore".to_string()
    } else {
        format!("/explore?{query}")
    }
}

/// Catalog with category filter and pagination.
///
/// Switching category links to page 1. Pages past the end render an empty grid.
#[instrument(skip(state, session))]
pub async fn explore(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ExploreQuery>,
) -> Result<ExploreTemplate> {
    let category = query
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(ALL_CATEGORIES);
    let page_number = query.page.unwrap_or(1).max(1);
    let page_size = state.config().catalog.page_size;

    let catalog = state.catalog();
    let page = catalog.browse(category, page_number, page_size);

    let categories = std::iter::once(ALL_CATEGORIES)
        .chain(catalog.categories())
        .map(|label| CategoryLink {
            label: label.to_string(),
            href: explore_href(label, 1),
            active: label == category,
        })
        .collect();

    // Controls only appear when there is more than one page
    let pages = if page.total_pages > 1 {
        (1..=page.total_pages)
            .map(|number| PageLink {
                number,
                href: explore_href(category, number),
                active: number == page_number,
            })
            .collect()
    } else {
        Vec::new()
    };

    tracing::debug!(
        category,
        page = page_number,
        shown = page.items.len(),
        "Rendering explore page"
    );

    let return_to = explore_href(category, page_number);
    Ok(ExploreTemplate {
        chrome: Chrome::load(&session, Section::Explore, &return_to).await?,
        categories,
        products: page.items.into_iter().map(ProductCard::from).collect(),
        pages,
        total_items: page.total_items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explore_href() {
        assert_eq!(explore_href("All", 1), "/explore");
        assert_eq!(explore_href("All", 3), "/explore?page=3");
        assert_eq!(explore_href("Gaming", 1), "/explore?category=Gaming");
        assert_eq!(
            explore_href("Gaming", 2),
            "/explore?category=Gaming&page=2"
        );
    }

    #[test]
    fn test_explore_href_encodes_labels() {
        assert_eq!(
            explore_href("Home & Audio", 1),
            "/explore?category=Home+%26+Audio"
        );
    }
}

//! Product catalog, category filtering and pagination.
//!
//! The catalog is static reference data for the lifetime of the process.
//! Filtering and pagination are pure functions recomputed on every request;
//! nothing here caches a derived view.

use std::collections::HashSet;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Price, ProductId};

/// Sentinel category that matches every product.
pub const ALL_CATEGORIES: &str = "All";

/// Number of products produced by the default generator.
pub const DEFAULT_CATALOG_SIZE: u32 = 50;

/// Products per explore page.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Categories assigned by the generator, cycling by index.
pub const GENERATED_CATEGORIES: [&str; 4] = ["Watches", "Electronics", "Gaming", "Audio"];

/// Inclusive whole-dollar price range of generated products.
const GENERATED_PRICE_DOLLARS: std::ops::RangeInclusive<u64> = 200..=1700;

/// Errors that can occur when loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read.
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog document is not valid JSON or has a malformed product.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two products share an id.
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
}

/// Immutable product reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: Price,
    #[serde(alias = "image")]
    pub image_url: String,
}

/// The session-wide product list.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Generate `count` products deterministically from `seed`.
    ///
    /// Product `i` (0-indexed) has id `i + 1`, category
    /// `GENERATED_CATEGORIES[i % 4]` and name `"{category} Unit {100 + i}"`.
    #[must_use]
    pub fn generate(count: u32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let products = GENERATED_CATEGORIES
            .iter()
            .cycle()
            .zip(0..count)
            .map(|(category, index)| Product {
                id: ProductId::new(index + 1),
                name: format!("{category} Unit {}", 100 + index),
                category: (*category).to_string(),
                price: Price::from_dollars(rng.random_range(GENERATED_PRICE_DOLLARS)),
                image_url: format!("{}&sig={index}", category_image(category)),
            })
            .collect();

        Self { products }
    }

    /// Build a catalog from an explicit product list.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if two products share an id.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
        }
        Ok(Self { products })
    }

    /// Parse a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or ids repeat.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::from_products(products)
    }

    /// Load a JSON catalog document from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Distinct category labels in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .map(|p| p.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Filter by category and return the requested page.
    #[must_use]
    pub fn browse(&self, category: &str, page: usize, page_size: usize) -> Page<'_> {
        let filtered = filter_by_category(&self.products, category);
        Page {
            items: paginate(&filtered, page, page_size).to_vec(),
            page,
            total_pages: page_count(filtered.len(), page_size),
            total_items: filtered.len(),
        }
    }
}

/// One page of a filtered product list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a> {
    pub items: Vec<&'a Product>,
    /// 1-based page number that was requested.
    pub page: usize,
    pub total_pages: usize,
    /// Number of products matching the filter across all pages.
    pub total_items: usize,
}

impl Page<'_> {
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// All products when `category` is [`ALL_CATEGORIES`], otherwise an exact
/// label match. Unknown categories yield an empty list.
#[must_use]
pub fn filter_by_category<'a>(products: &'a [Product], category: &str) -> Vec<&'a Product> {
    if category == ALL_CATEGORIES {
        return products.iter().collect();
    }
    products.iter().filter(|p| p.category == category).collect()
}

/// The slice `[(page - 1) * page_size, page * page_size)` of `items`.
///
/// Pages are 1-based. Page 0, pages past the end and a zero page size all
/// yield an empty slice.
#[must_use]
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let Some(start) = (page - 1).checked_mul(page_size) else {
        return &[];
    };
    let end = start.saturating_add(page_size).min(items.len());
    items.get(start..end).unwrap_or(&[])
}

/// Number of pages needed to show `len` items, `page_size` at a time.
#[must_use]
pub const fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

fn category_image(category: &str) -> &'static str {
    match category {
        "Watches" => {
            "https://images.unsplash.com/photo-1523275335684-37898b6baf30?q=80&w=800&auto=format&fit=crop"
        }
        "Electronics" => {
            "https://images.unsplash.com/photo-1498049794561-7780e7231661?q=80&w=800&auto=format&fit=crop"
        }
        "Gaming" => {
            "https://images.unsplash.com/photo-1542751371-adc38448a05e?q=80&w=800&auto=format&fit=crop"
        }
        _ => {
            "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?q=80&w=800&auto=format&fit=crop"
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::generate(DEFAULT_CATALOG_SIZE, 7)
    }

    #[test]
    fn test_generate_shape() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 50);

        let first = &catalog.products()[0];
        assert_eq!(first.id, ProductId::new(1));
        assert_eq!(first.category, "Watches");
        assert_eq!(first.name, "Watches Unit 100");
        assert!(first.image_url.ends_with("&sig=0"));

        let third = &catalog.products()[2];
        assert_eq!(third.category, "Gaming");
        assert_eq!(third.name, "Gaming Unit 102");
    }

    #[test]
    fn test_generate_prices_in_range() {
        for product in catalog().products() {
            let cents = product.price.cents();
            assert!((20_000..=170_000).contains(&cents), "{cents}");
            assert_eq!(cents % 100, 0);
        }
    }

    #[test]
    fn test_generate_is_deterministic_per_seed() {
        assert_eq!(
            Catalog::generate(50, 99).products(),
            Catalog::generate(50, 99).products()
        );
    }

    #[test]
    fn test_filter_all_returns_everything() {
        let catalog = catalog();
        assert_eq!(filter_by_category(catalog.products(), ALL_CATEGORIES).len(), 50);
    }

    #[test]
    fn test_filter_gaming_is_every_fourth_from_index_two() {
        let catalog = catalog();
        let gaming = filter_by_category(catalog.products(), "Gaming");
        assert_eq!(gaming.len(), 12);

        let expected: Vec<u32> = (2..50).step_by(4).map(|i| i + 1).collect();
        let actual: Vec<u32> = gaming.iter().map(|p| p.id.as_u32()).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_filter_unknown_category_is_empty() {
        let catalog = catalog();
        assert!(filter_by_category(catalog.products(), "Furniture").is_empty());
        assert!(filter_by_category(catalog.products(), "gaming").is_empty());
    }

    #[test]
    fn test_paginate_fifty_by_twelve() {
        let items: Vec<u32> = (0..50).collect();
        let sizes: Vec<usize> = (1..=5).map(|p| paginate(&items, p, 12).len()).collect();
        assert_eq!(sizes, vec![12, 12, 12, 12, 2]);
        assert_eq!(page_count(items.len(), 12), 5);
        assert!(paginate(&items, 6, 12).is_empty());
        assert_eq!(paginate(&items, 2, 12)[0], 12);
    }

    #[test]
    fn test_paginate_degenerate_inputs() {
        let items = [1, 2, 3];
        assert!(paginate(&items, 0, 12).is_empty());
        assert!(paginate(&items, 1, 0).is_empty());
        assert!(paginate(&items, usize::MAX, 12).is_empty());
        assert_eq!(page_count(0, 12), 0);
        assert_eq!(page_count(3, 0), 0);
    }

    #[test]
    fn test_browse_combines_filter_and_page() {
        let catalog = catalog();
        let page = catalog.browse("Watches", 2, 12);
        assert_eq!(page.total_items, 13);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, ProductId::new(49));
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn test_categories_first_seen_order() {
        assert_eq!(catalog().categories(), GENERATED_CATEGORIES.to_vec());
    }

    #[test]
    fn test_find() {
        let catalog = catalog();
        assert_eq!(catalog.find(ProductId::new(3)).unwrap().category, "Gaming");
        assert!(catalog.find(ProductId::new(51)).is_none());
    }

    #[test]
    fn test_from_json_accepts_display_prices() {
        let catalog = Catalog::from_json(
            r#"[
                {"id": 1, "name": "Nebula Core X", "category": "Processors", "price": "$2,400", "image": "https://example.com/a.jpg"},
                {"id": 2, "name": "Aether Lens", "category": "Optics", "price": 89000, "image_url": "https://example.com/b.jpg"}
            ]"#,
        )
        .unwrap();

        assert_eq!(catalog.products()[0].price, Price::from_dollars(2400));
        assert_eq!(catalog.products()[1].price, Price::from_dollars(890));
    }

    #[test]
    fn test_from_json_rejects_duplicates_and_bad_prices() {
        let duplicate = r#"[
            {"id": 1, "name": "A", "category": "X", "price": 100, "image": ""},
            {"id": 1, "name": "B", "category": "X", "price": 100, "image": ""}
        ]"#;
        assert!(matches!(
            Catalog::from_json(duplicate),
            Err(CatalogError::DuplicateId(_))
        ));

        let bad_price = r#"[{"id": 1, "name": "A", "category": "X", "price": "free", "image": ""}]"#;
        assert!(matches!(
            Catalog::from_json(bad_price),
            Err(CatalogError::Parse(_))
        ));
    }
}

//! Shopping cart state container.
//!
//! A [`CartState`] is owned by one visitor and mutated by one writer at a
//! time. Lines keep insertion order and there is at most one line per
//! product id. Totals are derived on every read and never stored.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::{Price, ProductId};

/// Smallest quantity a line can hold. Use [`CartState::remove`] to delete.
pub const MIN_QUANTITY: u32 = 1;

/// One product-and-quantity pairing in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    product: Product,
    quantity: u32,
}

impl CartLine {
    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.product.price * self.quantity
    }
}

/// The visitor's cart plus the visibility flag of the cart panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartState {
    lines: Vec<CartLine>,
    #[serde(default)]
    is_open: bool,
}

impl CartState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `product`, appending a new line if none exists.
    ///
    /// Opens the cart panel.
    pub fn add(&mut self, product: &Product) {
        match self.line_mut(product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine {
                product: product.clone(),
                quantity: MIN_QUANTITY,
            }),
        }
        self.is_open = true;
    }

    /// Delete the line for `id`. Returns `false` if there was none.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product.id != id);
        self.lines.len() != before
    }

    /// Shift the quantity of the line for `id` by `delta`, never below
    /// [`MIN_QUANTITY`].
    ///
    /// Returns the new quantity, or `None` if there is no line for `id`.
    pub fn update_quantity(&mut self, id: ProductId, delta: i64) -> Option<u32> {
        let line = self.line_mut(id)?;
        let target = i64::from(line.quantity)
            .saturating_add(delta)
            .max(i64::from(MIN_QUANTITY));
        line.quantity = u32::try_from(target).unwrap_or(u32::MAX);
        Some(line.quantity)
    }

    pub const fn set_open(&mut self, open: bool) {
        self.is_open = open;
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of unit price times quantity across all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    fn line_mut(&mut self, id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.product.id == id)
    }
}

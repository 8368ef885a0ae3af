//! Nebula Core - Shared domain library.
//!
//! This crate provides the domain model used by the Nebula storefront:
//! - [`types`] - Newtype wrappers for type-safe IDs, prices and emails
//! - [`catalog`] - Product catalog, category filtering and pagination
//! - [`cart`] - The per-visitor shopping cart state container
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O beyond
//! parsing catalog documents, no HTTP. Every derived value (cart totals,
//! visible catalog pages) is recomputed from its source on each read.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod types;

pub use cart::{CartLine, CartState};
pub use catalog::{Catalog, CatalogError, Page, Product};
pub use types::*;

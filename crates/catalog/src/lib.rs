//! Catalog domain module.
//!
//! Holds the product list and the active filter criteria, and derives the
//! filtered view. Pure, deterministic logic (no IO, no storage).

pub mod filter;
pub mod product;
pub mod seed;
pub mod store;

pub use filter::{ActiveFilter, FilterCriteria, FilterPatch, PriceRange};
pub use product::{Category, Product, ProductId, Rating};
pub use store::{
    Catalog, CatalogAction, CatalogEvent, FiltersChanged, FiltersCleared, LoadFailed,
    LoadingChanged, ProductsLoaded,
};

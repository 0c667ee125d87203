use core::convert::Infallible;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use frostcart_core::{Store, dispatch_total};
use frostcart_events::Event;

use crate::filter::{FilterCriteria, FilterPatch};
use crate::product::{Product, ProductId};
use crate::seed;

/// Catalog store: product list, active filters and load status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
    filters: FilterCriteria,
    loading: bool,
    error: Option<String>,
    version: u64,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            filters: FilterCriteria::default(),
            loading: false,
            error: None,
            version: 0,
        }
    }

    /// Catalog preloaded with [`seed::default_products`].
    pub fn seeded() -> Self {
        Self::new(seed::default_products())
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Products passing the current filters, in catalog order.
    pub fn filtered_products(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| self.filters.matches(p))
            .collect()
    }

    pub fn set_products(&mut self, products: Vec<Product>) -> Vec<CatalogEvent> {
        dispatch_total(
            self,
            &CatalogAction::SetProducts {
                products,
                occurred_at: Utc::now(),
            },
        )
    }

    pub fn set_loading(&mut self, loading: bool) -> Vec<CatalogEvent> {
        dispatch_total(
            self,
            &CatalogAction::SetLoading {
                loading,
                occurred_at: Utc::now(),
            },
        )
    }

    pub fn set_error(&mut self, message: impl Into<String>) -> Vec<CatalogEvent> {
        dispatch_total(
            self,
            &CatalogAction::SetError {
                message: message.into(),
                occurred_at: Utc::now(),
            },
        )
    }

    pub fn set_filters(&mut self, patch: FilterPatch) -> Vec<CatalogEvent> {
        dispatch_total(
            self,
            &CatalogAction::SetFilters {
                patch,
                occurred_at: Utc::now(),
            },
        )
    }

    pub fn clear_filters(&mut self) -> Vec<CatalogEvent> {
        dispatch_total(
            self,
            &CatalogAction::ClearFilters {
                occurred_at: Utc::now(),
            },
        )
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogAction {
    SetProducts {
        products: Vec<Product>,
        occurred_at: DateTime<Utc>,
    },
    SetLoading {
        loading: bool,
        occurred_at: DateTime<Utc>,
    },
    SetError {
        message: String,
        occurred_at: DateTime<Utc>,
    },
    SetFilters {
        patch: FilterPatch,
        occurred_at: DateTime<Utc>,
    },
    ClearFilters {
        occurred_at: DateTime<Utc>,
    },
}

/// Event: ProductsLoaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductsLoaded {
    pub products: Vec<Product>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: LoadingChanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadingChanged {
    pub loading: bool,
    pub occurred_at: DateTime<Utc>,
}

/// Event: LoadFailed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadFailed {
    pub message: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: FiltersChanged. Carries the full criteria after the merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiltersChanged {
    pub filters: FilterCriteria,
    pub occurred_at: DateTime<Utc>,
}

/// Event: FiltersCleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiltersCleared {
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogEvent {
    ProductsLoaded(ProductsLoaded),
    LoadingChanged(LoadingChanged),
    LoadFailed(LoadFailed),
    FiltersChanged(FiltersChanged),
    FiltersCleared(FiltersCleared),
}

impl Event for CatalogEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CatalogEvent::ProductsLoaded(_) => "catalog.products.loaded",
            CatalogEvent::LoadingChanged(_) => "catalog.loading.changed",
            CatalogEvent::LoadFailed(_) => "catalog.load.failed",
            CatalogEvent::FiltersChanged(_) => "catalog.filters.changed",
            CatalogEvent::FiltersCleared(_) => "catalog.filters.cleared",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CatalogEvent::ProductsLoaded(e) => e.occurred_at,
            CatalogEvent::LoadingChanged(e) => e.occurred_at,
            CatalogEvent::LoadFailed(e) => e.occurred_at,
            CatalogEvent::FiltersChanged(e) => e.occurred_at,
            CatalogEvent::FiltersCleared(e) => e.occurred_at,
        }
    }
}

impl Store for Catalog {
    type Action = CatalogAction;
    type Event = CatalogEvent;
    type Error = Infallible;

    const NAME: &'static str = "catalog";

    fn version(&self) -> u64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CatalogEvent::ProductsLoaded(e) => {
                self.products = e.products.clone();
                self.loading = false;
                self.error = None;
            }
            CatalogEvent::LoadingChanged(e) => {
                self.loading = e.loading;
            }
            CatalogEvent::LoadFailed(e) => {
                self.error = Some(e.message.clone());
                self.loading = false;
            }
            CatalogEvent::FiltersChanged(e) => {
                self.filters = e.filters.clone();
            }
            CatalogEvent::FiltersCleared(_) => {
                self.filters = FilterCriteria::default();
            }
        }

        self.version += 1;
    }

    fn handle(&self, action: &Self::Action) -> Result<Vec<Self::Event>, Self::Error> {
        let events = match action {
            CatalogAction::SetProducts {
                products,
                occurred_at,
            } => vec![CatalogEvent::ProductsLoaded(ProductsLoaded {
                products: products.clone(),
                occurred_at: *occurred_at,
            })],
            CatalogAction::SetLoading {
                loading,
                occurred_at,
            } => {
                if *loading == self.loading {
                    vec![]
                } else {
                    vec![CatalogEvent::LoadingChanged(LoadingChanged {
                        loading: *loading,
                        occurred_at: *occurred_at,
                    })]
                }
            }
            CatalogAction::SetError {
                message,
                occurred_at,
            } => {
                tracing::warn!(error = %message, "catalog load failed");
                vec![CatalogEvent::LoadFailed(LoadFailed {
                    message: message.clone(),
                    occurred_at: *occurred_at,
                })]
            }
            CatalogAction::SetFilters { patch, occurred_at } => {
                let filters = self.filters.merged(patch);
                if filters == self.filters {
                    tracing::trace!("filter patch left criteria unchanged");
                    vec![]
                } else {
                    vec![CatalogEvent::FiltersChanged(FiltersChanged {
                        filters,
                        occurred_at: *occurred_at,
                    })]
                }
            }
            CatalogAction::ClearFilters { occurred_at } => {
                if self.filters.is_default() {
                    vec![]
                } else {
                    vec![CatalogEvent::FiltersCleared(FiltersCleared {
                        occurred_at: *occurred_at,
                    })]
                }
            }
        };
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::PriceRange;
    use crate::product::{Category, Rating};
    use frostcart_core::Money;

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn unfiltered_catalog_returns_every_product_in_order() {
        let catalog = Catalog::seeded();
        assert_eq!(ids(&catalog.filtered_products()), vec!["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn category_filter_keeps_original_relative_order() {
        let mut catalog = Catalog::seeded();
        catalog.set_filters(FilterPatch::new().category(Category::Ac));

        let filtered = catalog.filtered_products();
        assert_eq!(ids(&filtered), vec!["1", "3", "5"]);
        assert!(filtered.iter().all(|p| p.category == Category::Ac));
    }

    #[test]
    fn price_patch_narrows_existing_category_filter() {
        let mut catalog = Catalog::seeded();
        catalog.set_filters(FilterPatch::new().category(Category::Ac));
        catalog.set_filters(FilterPatch::new().price_range(Money::ZERO, Money::from_major(30_000)));

        let filtered = catalog.filtered_products();
        assert_eq!(ids(&filtered), vec!["5"]);
        assert!(filtered.iter().all(|p| p.price <= Money::from_major(30_000)));
        assert_eq!(catalog.filters().category, Some(Category::Ac));
    }

    #[test]
    fn clear_filters_restores_full_catalog() {
        let mut catalog = Catalog::seeded();
        catalog.set_filters(
            FilterPatch::new()
                .category(Category::Fan)
                .min_rating(Rating::stars(4).unwrap()),
        );
        assert_eq!(catalog.filtered_products().len(), 3);

        let events = catalog.clear_filters();
        assert!(matches!(events.as_slice(), [CatalogEvent::FiltersCleared(_)]));
        assert_eq!(catalog.filters(), &FilterCriteria::default());
        assert_eq!(ids(&catalog.filtered_products()), vec!["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let mut catalog = Catalog::seeded();
        catalog.set_filters(FilterPatch::new().min_rating(Rating::saturating(43)));
        let first = ids(&catalog.filtered_products());
        let second = ids(&catalog.filtered_products());
        assert_eq!(first, second);
        assert_eq!(first, vec!["1", "3", "5"]);
    }

    #[test]
    fn unchanged_filters_emit_nothing() {
        let mut catalog = Catalog::seeded();
        assert!(catalog.set_filters(FilterPatch::new()).is_empty());
        assert!(catalog.clear_filters().is_empty());
        assert_eq!(catalog.version(), 0);
    }

    #[test]
    fn filters_changed_event_carries_merged_criteria() {
        let mut catalog = Catalog::seeded();
        let events = catalog.set_filters(FilterPatch::new().category(Category::Fan));
        match &events[..] {
            [CatalogEvent::FiltersChanged(e)] => {
                assert_eq!(e.filters.category, Some(Category::Fan));
                assert_eq!(e.filters.price_range, PriceRange::DEFAULT);
            }
            other => panic!("expected FiltersChanged, got {other:?}"),
        }
        assert_eq!(events[0].event_type(), "catalog.filters.changed");
    }

    #[test]
    fn load_status_follows_loading_error_and_products() {
        let mut catalog = Catalog::default();
        catalog.set_loading(true);
        assert!(catalog.is_loading());

        catalog.set_error("network down");
        assert!(!catalog.is_loading());
        assert_eq!(catalog.error(), Some("network down"));

        catalog.set_loading(true);
        catalog.set_products(seed::default_products());
        assert!(!catalog.is_loading());
        assert_eq!(catalog.error(), None);
        assert_eq!(catalog.products().len(), 6);
    }

    #[test]
    fn set_products_keeps_active_filters() {
        let mut catalog = Catalog::seeded();
        catalog.set_filters(FilterPatch::new().category(Category::Fan));
        catalog.set_products(seed::default_products());
        assert_eq!(catalog.filters().category, Some(Category::Fan));
    }

    #[test]
    fn product_lookup_by_id() {
        let catalog = Catalog::seeded();
        let product = catalog.product(&ProductId::new("3")).unwrap();
        assert_eq!(product.name, "Inverter AC 2 Ton");
        assert!(catalog.product(&ProductId::new("99")).is_none());
    }

    #[test]
    fn handle_does_not_mutate_state() {
        let catalog = Catalog::seeded();
        let before = catalog.clone();
        let events = catalog
            .handle(&CatalogAction::SetFilters {
                patch: FilterPatch::new().category(Category::Ac),
                occurred_at: Utc::now(),
            })
            .unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(catalog, before);
    }
}

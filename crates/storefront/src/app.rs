//! Composition root: one instance of each store plus change notification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use frostcart_cart::{Cart, CartEvent, OrderSummary};
use frostcart_catalog::{
    ActiveFilter, Catalog, CatalogEvent, Category, FilterPatch, Product, ProductId, seed,
};
use frostcart_core::{CartLineId, DomainError, DomainResult, EventId, Store};
use frostcart_events::{Event, EventBus, EventEnvelope, InMemoryEventBus, Subscription};
use frostcart_identity::{AuthzError, MockAuthenticator, Session, SessionEvent, User};

use crate::admin::{AdminDashboard, OrderBook};
use crate::config::StorefrontConfig;

/// Any event emitted by a storefront store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorefrontEvent {
    Catalog(CatalogEvent),
    Cart(CartEvent),
    Session(SessionEvent),
}

impl Event for StorefrontEvent {
    fn event_type(&self) -> &'static str {
        match self {
            StorefrontEvent::Catalog(e) => e.event_type(),
            StorefrontEvent::Cart(e) => e.event_type(),
            StorefrontEvent::Session(e) => e.event_type(),
        }
    }

    fn version(&self) -> u32 {
        match self {
            StorefrontEvent::Catalog(e) => e.version(),
            StorefrontEvent::Cart(e) => e.version(),
            StorefrontEvent::Session(e) => e.version(),
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            StorefrontEvent::Catalog(e) => e.occurred_at(),
            StorefrontEvent::Cart(e) => e.occurred_at(),
            StorefrontEvent::Session(e) => e.occurred_at(),
        }
    }
}

pub type StoreEnvelope = EventEnvelope<StorefrontEvent>;

/// The storefront the presentation layer talks to.
///
/// Mutations go through the owning store; every resulting event is
/// published to subscribers with a storefront-wide sequence number.
#[derive(Debug)]
pub struct Storefront {
    config: StorefrontConfig,
    catalog: Catalog,
    cart: Cart,
    session: Session,
    authenticator: MockAuthenticator,
    orders: OrderBook,
    bus: InMemoryEventBus<StoreEnvelope>,
    sequence: u64,
}

impl Storefront {
    pub fn new(config: StorefrontConfig, products: Vec<Product>) -> Self {
        let cart = Cart::new(config.merge_policy);
        let authenticator = MockAuthenticator::new(config.admin_email.clone());
        tracing::info!(
            products = products.len(),
            tax_rate = %config.tax_rate,
            merge_policy = ?config.merge_policy,
            "storefront ready"
        );
        Self {
            config,
            catalog: Catalog::new(products),
            cart,
            session: Session::new(),
            authenticator,
            orders: OrderBook::mock(),
            bus: InMemoryEventBus::new(),
            sequence: 0,
        }
    }

    /// Storefront over the static launch catalog.
    pub fn seeded(config: StorefrontConfig) -> Self {
        Self::new(config, seed::default_products())
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn orders(&self) -> &OrderBook {
        &self.orders
    }

    pub fn subscribe(&self) -> Subscription<StoreEnvelope> {
        self.bus.subscribe()
    }

    /// Sequence number of the most recently published event (0 if none).
    pub fn last_sequence(&self) -> u64 {
        self.sequence
    }

    // ── catalog ────────────────────────────────────────────────────────────

    pub fn filtered_products(&self) -> Vec<&Product> {
        self.catalog.filtered_products()
    }

    pub fn set_filters(&mut self, patch: FilterPatch) {
        let events = self.catalog.set_filters(patch);
        self.publish(Catalog::NAME, events, StorefrontEvent::Catalog);
    }

    pub fn clear_filters(&mut self) {
        let events = self.catalog.clear_filters();
        self.publish(Catalog::NAME, events, StorefrontEvent::Catalog);
    }

    /// Drop a single chip.
    pub fn remove_filter(&mut self, filter: &ActiveFilter) {
        self.set_filters(filter.removal_patch());
    }

    /// Apply a `?category=` query value. Invalid values leave filters as-is.
    pub fn apply_query_category(&mut self, value: &str) -> DomainResult<()> {
        let category: Category = value.parse().inspect_err(|e| {
            tracing::warn!(error = %e, "ignoring category query");
        })?;
        self.set_filters(FilterPatch::new().category(category));
        Ok(())
    }

    pub fn set_products(&mut self, products: Vec<Product>) {
        let events = self.catalog.set_products(products);
        self.publish(Catalog::NAME, events, StorefrontEvent::Catalog);
    }

    pub fn set_loading(&mut self, loading: bool) {
        let events = self.catalog.set_loading(loading);
        self.publish(Catalog::NAME, events, StorefrontEvent::Catalog);
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        let events = self.catalog.set_error(message);
        self.publish(Catalog::NAME, events, StorefrontEvent::Catalog);
    }

    /// Load products from JSON; a rejected document is recorded as the
    /// catalog error and returned.
    pub fn load_products_json(&mut self, json: &str) -> DomainResult<()> {
        self.set_loading(true);
        match seed::products_from_json(json) {
            Ok(products) => {
                self.set_products(products);
                Ok(())
            }
            Err(e) => {
                self.set_error(e.to_string());
                Err(e)
            }
        }
    }

    // ── cart ───────────────────────────────────────────────────────────────

    /// Add `quantity` units of a catalog product. `color` defaults to the
    /// product's first color.
    pub fn add_to_cart(&mut self, product_id: &ProductId, color: Option<&str>, quantity: u32) -> DomainResult<()> {
        let product = self
            .catalog
            .product(product_id)
            .ok_or_else(|| DomainError::not_found(format!("product {product_id}")))?;
        let events = self.cart.add_to_cart(product, color, quantity);
        self.publish(Cart::NAME, events, StorefrontEvent::Cart);
        Ok(())
    }

    pub fn update_quantity(&mut self, line_id: CartLineId, quantity: i64) {
        let events = self.cart.update_quantity(line_id, quantity);
        self.publish(Cart::NAME, events, StorefrontEvent::Cart);
    }

    pub fn step_quantity(&mut self, line_id: CartLineId, delta: i64) {
        let events = self.cart.step_quantity(line_id, delta);
        self.publish(Cart::NAME, events, StorefrontEvent::Cart);
    }

    pub fn remove_from_cart(&mut self, line_id: CartLineId) {
        let events = self.cart.remove_from_cart(line_id);
        self.publish(Cart::NAME, events, StorefrontEvent::Cart);
    }

    pub fn order_summary(&self) -> OrderSummary {
        OrderSummary::compute(&self.cart, self.config.tax_rate, self.config.free_delivery_threshold)
    }

    // ── identity ───────────────────────────────────────────────────────────

    pub fn login_with_email(&mut self, email: &str, password: &str) -> DomainResult<User> {
        let user = self.authenticator.login_with_email(email, password)?;
        self.sign_in(user.clone());
        Ok(user)
    }

    pub fn login_with_google(&mut self) -> User {
        let user = self.authenticator.login_with_google();
        self.sign_in(user.clone());
        user
    }

    pub fn logout(&mut self) {
        let events = self.session.sign_out();
        self.publish(Session::NAME, events, StorefrontEvent::Session);
    }

    pub fn admin_dashboard(&self) -> Result<AdminDashboard, AuthzError> {
        AdminDashboard::load(&self.session, &self.catalog, &self.orders)
    }

    fn sign_in(&mut self, user: User) {
        let events = self.session.sign_in(user);
        self.publish(Session::NAME, events, StorefrontEvent::Session);
    }

    fn publish<E>(&mut self, store: &'static str, events: Vec<E>, wrap: fn(E) -> StorefrontEvent) {
        for event in events {
            self.sequence += 1;
            let payload = wrap(event);
            tracing::debug!(
                store,
                sequence = self.sequence,
                event_type = payload.event_type(),
                "publishing store event"
            );
            let envelope = EventEnvelope::new(EventId::new(), store, self.sequence, payload);
            if let Err(e) = self.bus.publish(envelope) {
                tracing::warn!(error = ?e, store, "store event not delivered");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frostcart_catalog::Rating;
    use frostcart_core::Money;

    fn storefront() -> Storefront {
        Storefront::seeded(StorefrontConfig::default())
    }

    #[test]
    fn unknown_product_cannot_be_added() {
        let mut store = storefront();
        let err = store.add_to_cart(&ProductId::new("404"), None, 1).unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
        assert!(store.cart().is_empty());
    }

    #[test]
    fn invalid_category_query_leaves_filters_alone() {
        let mut store = storefront();
        store.apply_query_category("fan").unwrap();
        assert!(store.apply_query_category("heater").is_err());
        assert_eq!(store.catalog().filters().category, Some(Category::Fan));
    }

    #[test]
    fn remove_filter_drops_only_that_chip() {
        let mut store = storefront();
        store.set_filters(
            FilterPatch::new()
                .category(Category::Ac)
                .min_rating(Rating::stars(4).unwrap()),
        );
        let chips = store.catalog().filters().active_filters();
        store.remove_filter(&chips[0]);

        assert_eq!(store.catalog().filters().category, None);
        assert!(store.catalog().filters().rating.is_some());
    }

    #[test]
    fn noop_mutations_publish_nothing() {
        let mut store = storefront();
        let sub = store.subscribe();
        store.clear_filters();
        store.update_quantity(CartLineId::new(), 2);
        store.logout();
        assert!(sub.drain().is_empty());
        assert_eq!(store.last_sequence(), 0);
    }

    #[test]
    fn rejected_json_is_recorded_as_catalog_error() {
        let mut store = storefront();
        assert!(store.load_products_json("not json").is_err());
        assert!(store.catalog().error().is_some());
        assert!(!store.catalog().is_loading());
        assert_eq!(store.catalog().products().len(), 6);
    }

    #[test]
    fn summary_uses_configured_rate_and_threshold() {
        let config = StorefrontConfig {
            tax_rate: "0.1".parse().unwrap(),
            free_delivery_threshold: Money::from_major(10_000),
            ..StorefrontConfig::default()
        };
        let mut store = Storefront::seeded(config);
        store.add_to_cart(&ProductId::new("4"), None, 2).unwrap();

        let summary = store.order_summary();
        assert_eq!(summary.subtotal, Money::from_major(5_000));
        assert_eq!(summary.total, Money::from_major(5_500));
        assert!(!summary.free_delivery);
    }
}

//! `frostcart-storefront`: wires the catalog, cart and session stores,
//! runtime configuration and the admin dashboard into one [`Storefront`].

pub mod admin;
pub mod app;
pub mod config;

pub use admin::{AdminDashboard, DashboardStats, MockOrder, OrderBook, OrderStatus, ProductRow};
pub use app::{StoreEnvelope, Storefront, StorefrontEvent};
pub use config::StorefrontConfig;

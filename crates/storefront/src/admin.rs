//! Admin dashboard read model.
//!
//! Orders are mock data; the product table and counts come from the live
//! catalog. Access requires an admin session.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use frostcart_catalog::{Catalog, Category, ProductId};
use frostcart_core::Money;
use frostcart_identity::{AuthzError, Session, require_admin};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "Pending"),
            OrderStatus::Processing => write!(f, "Processing"),
            OrderStatus::Shipped => write!(f, "Shipped"),
            OrderStatus::Delivered => write!(f, "Delivered"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockOrder {
    pub id: String,
    pub customer: String,
    pub items: u32,
    pub total: Money,
    pub status: OrderStatus,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBook {
    orders: Vec<MockOrder>,
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn order(id: &str, customer: &str, items: u32, rupees: u64, status: OrderStatus, date: NaiveDate) -> MockOrder {
    MockOrder {
        id: id.to_string(),
        customer: customer.to_string(),
        items,
        total: Money::from_major(rupees),
        status,
        date,
    }
}

impl OrderBook {
    pub fn new(orders: Vec<MockOrder>) -> Self {
        Self { orders }
    }

    /// Demo orders shown on the dashboard.
    pub fn mock() -> Self {
        Self::new(vec![
            order("1", "John Doe", 3, 45_000, OrderStatus::Pending, date(2024, 3, 15)),
            order("2", "Priya Sharma", 1, 3_500, OrderStatus::Processing, date(2024, 3, 14)),
            order("3", "Arjun Mehta", 2, 63_000, OrderStatus::Shipped, date(2024, 3, 12)),
            order("4", "John Doe", 1, 2_500, OrderStatus::Delivered, date(2024, 3, 10)),
        ])
    }

    pub fn orders(&self) -> &[MockOrder] {
        &self.orders
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_orders: usize,
    pub revenue: Money,
    pub products: usize,
    pub customers: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRow {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    pub price: Money,
    pub stock: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminDashboard {
    pub stats: DashboardStats,
    pub orders: Vec<MockOrder>,
    pub products: Vec<ProductRow>,
}

impl AdminDashboard {
    pub fn load(session: &Session, catalog: &Catalog, orders: &OrderBook) -> Result<Self, AuthzError> {
        let admin = require_admin(session)?;
        tracing::debug!(user_id = %admin.id, "assembling admin dashboard");

        let customers: HashSet<&str> = orders.orders().iter().map(|o| o.customer.as_str()).collect();
        let stats = DashboardStats {
            total_orders: orders.orders().len(),
            revenue: orders.orders().iter().map(|o| o.total).sum(),
            products: catalog.products().len(),
            customers: customers.len(),
        };

        let products = catalog
            .products()
            .iter()
            .map(|p| ProductRow {
                id: p.id.clone(),
                name: p.name.clone(),
                category: p.category,
                price: p.price,
                stock: p.stock,
            })
            .collect();

        Ok(Self {
            stats,
            orders: orders.orders().to_vec(),
            products,
        })
    }
}

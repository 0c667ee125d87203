use serde::{Deserialize, Serialize};

use frostcart_core::{Money, TaxRate};

use crate::cart::Cart;

/// Figures for the order summary panel beside the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub line_count: usize,
    pub item_count: u64,
    pub subtotal: Money,
    pub tax: Money,
    /// `subtotal + tax`; shipping is free.
    pub total: Money,
    /// Whether the subtotal reaches the free-delivery threshold.
    pub free_delivery: bool,
}

impl OrderSummary {
    pub fn compute(cart: &Cart, tax_rate: TaxRate, free_delivery_threshold: Money) -> Self {
        let subtotal = cart.subtotal();
        let tax = tax_rate.tax_on(subtotal);
        Self {
            line_count: cart.line_count(),
            item_count: cart.item_count(),
            subtotal,
            tax,
            total: subtotal.saturating_add(tax),
            free_delivery: !cart.is_empty() && subtotal >= free_delivery_threshold,
        }
    }
}

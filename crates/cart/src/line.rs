use core::str::FromStr;
use serde::{Deserialize, Serialize};

use frostcart_catalog::{Product, ProductId};
use frostcart_core::{CartLineId, DomainError, Money};

/// One cart entry: a product snapshot and a quantity (always >= 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: CartLineId,
    pub product_id: ProductId,
    pub name: String,
    /// Unit price in minor currency units, captured when the line was added.
    pub price: Money,
    pub image: String,
    pub color: Option<String>,
    pub quantity: u32,
}

impl CartLine {
    /// Snapshot `product` into a new line. `color` falls back to the
    /// product's first listed color.
    pub fn from_product(id: CartLineId, product: &Product, color: Option<&str>, quantity: u32) -> Self {
        let color = color.or_else(|| product.default_color()).map(str::to_string);
        Self {
            id,
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            color,
            quantity,
        }
    }

    pub fn line_total(&self) -> Money {
        self.price.times(self.quantity)
    }

    /// Same product and same chosen color.
    pub fn same_variant(&self, other: &CartLine) -> bool {
        self.product_id == other.product_id && self.color == other.color
    }
}

/// What adding an already-present product variant does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Increase the quantity of the line with the same product and color.
    #[default]
    MergeMatching,
    /// Always append a new line.
    SeparateLines,
}

impl FromStr for MergePolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "merge" | "merge_matching" => Ok(MergePolicy::MergeMatching),
            "separate" | "separate_lines" => Ok(MergePolicy::SeparateLines),
            other => Err(DomainError::validation(format!("unknown merge policy '{other}'"))),
        }
    }
}

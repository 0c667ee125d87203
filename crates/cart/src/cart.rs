use core::convert::Infallible;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use frostcart_catalog::Product;
use frostcart_core::{CartLineId, Money, Store, TaxRate, dispatch_total};
use frostcart_events::Event;

use crate::line::{CartLine, MergePolicy};

/// Cart store.
///
/// # Invariants
/// - Every line has quantity >= 1; a line that would drop to zero is removed.
/// - The subtotal is derived from the lines on every read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
    policy: MergePolicy,
    version: u64,
}

impl Cart {
    pub fn new(policy: MergePolicy) -> Self {
        Self {
            lines: Vec::new(),
            policy,
            version: 0,
        }
    }

    pub fn policy(&self) -> MergePolicy {
        self.policy
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, id: CartLineId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| l.quantity as u64).sum()
    }

    /// Σ price × quantity; zero for an empty cart.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// `subtotal × (1 + rate)`.
    pub fn total_with_tax(&self, rate: TaxRate) -> Money {
        rate.gross(self.subtotal())
    }

    pub fn add_to_cart(&mut self, product: &Product, color: Option<&str>, quantity: u32) -> Vec<CartEvent> {
        let line = CartLine::from_product(CartLineId::new(), product, color, quantity);
        dispatch_total(
            self,
            &CartAction::AddToCart {
                line,
                occurred_at: Utc::now(),
            },
        )
    }

    pub fn update_quantity(&mut self, line_id: CartLineId, quantity: i64) -> Vec<CartEvent> {
        dispatch_total(
            self,
            &CartAction::UpdateQuantity {
                line_id,
                quantity,
                occurred_at: Utc::now(),
            },
        )
    }

    pub fn remove_from_cart(&mut self, line_id: CartLineId) -> Vec<CartEvent> {
        dispatch_total(
            self,
            &CartAction::RemoveFromCart {
                line_id,
                occurred_at: Utc::now(),
            },
        )
    }

    /// The +/- buttons: a result of zero or less removes the line.
    pub fn step_quantity(&mut self, line_id: CartLineId, delta: i64) -> Vec<CartEvent> {
        let Some(line) = self.line(line_id) else {
            return vec![];
        };
        let next = (line.quantity as i64).saturating_add(delta);
        if next <= 0 {
            self.remove_from_cart(line_id)
        } else {
            self.update_quantity(line_id, next)
        }
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(MergePolicy::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartAction {
    /// `line` is the prospective new line; under `MergeMatching` only its
    /// quantity is used when a matching line already exists.
    AddToCart {
        line: CartLine,
        occurred_at: DateTime<Utc>,
    },
    UpdateQuantity {
        line_id: CartLineId,
        quantity: i64,
        occurred_at: DateTime<Utc>,
    },
    RemoveFromCart {
        line_id: CartLineId,
        occurred_at: DateTime<Utc>,
    },
}

/// Event: LineAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAdded {
    pub line: CartLine,
    pub occurred_at: DateTime<Utc>,
}

/// Event: QuantityChanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityChanged {
    pub line_id: CartLineId,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: LineRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRemoved {
    pub line_id: CartLineId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartEvent {
    LineAdded(LineAdded),
    QuantityChanged(QuantityChanged),
    LineRemoved(LineRemoved),
}

impl Event for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::LineAdded(_) => "cart.line.added",
            CartEvent::QuantityChanged(_) => "cart.line.quantity_changed",
            CartEvent::LineRemoved(_) => "cart.line.removed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CartEvent::LineAdded(e) => e.occurred_at,
            CartEvent::QuantityChanged(e) => e.occurred_at,
            CartEvent::LineRemoved(e) => e.occurred_at,
        }
    }
}

impl Store for Cart {
    type Action = CartAction;
    type Event = CartEvent;
    type Error = Infallible;

    const NAME: &'static str = "cart";

    fn version(&self) -> u64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CartEvent::LineAdded(e) => {
                self.lines.push(e.line.clone());
            }
            CartEvent::QuantityChanged(e) => {
                if let Some(line) = self.lines.iter_mut().find(|l| l.id == e.line_id) {
                    line.quantity = e.quantity;
                }
            }
            CartEvent::LineRemoved(e) => {
                self.lines.retain(|l| l.id != e.line_id);
            }
        }

        self.version += 1;
    }

    fn handle(&self, action: &Self::Action) -> Result<Vec<Self::Event>, Self::Error> {
        match action {
            CartAction::AddToCart { line, occurred_at } => Ok(self.handle_add(line, *occurred_at)),
            CartAction::UpdateQuantity {
                line_id,
                quantity,
                occurred_at,
            } => Ok(self.handle_update(*line_id, *quantity, *occurred_at)),
            CartAction::RemoveFromCart {
                line_id,
                occurred_at,
            } => Ok(self.handle_remove(*line_id, *occurred_at)),
        }
    }
}

impl Cart {
    fn handle_add(&self, line: &CartLine, occurred_at: DateTime<Utc>) -> Vec<CartEvent> {
        if line.quantity == 0 {
            tracing::trace!(product_id = %line.product_id, "ignoring add of zero units");
            return vec![];
        }

        let existing = match self.policy {
            MergePolicy::MergeMatching => self.lines.iter().find(|l| l.same_variant(line)),
            MergePolicy::SeparateLines => None,
        };

        match existing {
            Some(existing) => vec![CartEvent::QuantityChanged(QuantityChanged {
                line_id: existing.id,
                quantity: existing.quantity.saturating_add(line.quantity),
                occurred_at,
            })],
            None => vec![CartEvent::LineAdded(LineAdded {
                line: line.clone(),
                occurred_at,
            })],
        }
    }

    fn handle_update(&self, line_id: CartLineId, quantity: i64, occurred_at: DateTime<Utc>) -> Vec<CartEvent> {
        if quantity <= 0 {
            tracing::trace!(%line_id, quantity, "ignoring non-positive quantity");
            return vec![];
        }
        let Some(line) = self.line(line_id) else {
            return vec![];
        };

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if line.quantity == quantity {
            return vec![];
        }

        vec![CartEvent::QuantityChanged(QuantityChanged {
            line_id,
            quantity,
            occurred_at,
        })]
    }

    fn handle_remove(&self, line_id: CartLineId, occurred_at: DateTime<Utc>) -> Vec<CartEvent> {
        if self.line(line_id).is_none() {
            return vec![];
        }
        vec![CartEvent::LineRemoved(LineRemoved {
            line_id,
            occurred_at,
        })]
    }
}

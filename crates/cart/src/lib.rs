//! Shopping cart domain module.
//!
//! Cart lines with quantities, the derived subtotal and the order summary
//! shown beside the cart. Pure, deterministic logic (no IO, no storage).

pub mod cart;
pub mod line;
pub mod summary;

pub use cart::{Cart, CartAction, CartEvent, LineAdded, LineRemoved, QuantityChanged};
pub use line::{CartLine, MergePolicy};
pub use summary::OrderSummary;

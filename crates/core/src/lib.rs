//! `frostcart-core`: storefront foundation building blocks.
//!
//! Pure domain primitives (no IO): errors, identifiers, money and the
//! reducer-style [`Store`] trait.

pub mod error;
pub mod id;
pub mod money;
pub mod store;

pub use error::{DomainError, DomainResult};
pub use id::{CartLineId, EventId};
pub use money::{Money, TaxRate, parse_money};
pub use store::{Store, dispatch_total};

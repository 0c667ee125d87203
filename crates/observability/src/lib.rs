//! Tracing/logging setup shared by every frostcart binary.

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use crate::tracing::{LogFormat, init, init_with};

//! Shared logging setup for munim processes and test harnesses.

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use tracing::{init, init_for_tests};

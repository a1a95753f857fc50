//! Tracing/logging initialization.
//!
//! The ledger crates emit `tracing` events for every degraded fold (skipped
//! lines, unresolvable codes, reconciliation mismatches); this module decides
//! where those events go.

use tracing_subscriber::EnvFilter;

/// Initialize structured logging for a munim process.
///
/// JSON lines on stdout, level controlled by `RUST_LOG` (default `info`).
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}

/// Initialize plain logging routed through the test harness capture.
///
/// Defaults to `debug` so voucher-level warnings show up under
/// `cargo test -- --nocapture`. Safe to call from every test; the first
/// caller wins and the rest are no-ops.
pub fn init_for_tests() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .with_target(false)
        .compact()
        .try_init();
}

//! Append-only voucher log boundary.
//!
//! This module defines an infrastructure-facing abstraction for storing and
//! scanning tenant-scoped vouchers without making any storage assumptions.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryVoucherStore;
pub use r#trait::{StoreError, VoucherStore};

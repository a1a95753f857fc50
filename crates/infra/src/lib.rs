//! Infrastructure layer: the voucher log boundary and its in-memory store.
//!
//! The log is the system of record; balances and reports are always derived
//! from it, never stored. This crate defines the storage abstraction plus the
//! in-memory implementation used by tests and as the reference semantics for
//! real storage adapters.

pub mod voucher_store;

pub use voucher_store::{InMemoryVoucherStore, StoreError, VoucherStore};

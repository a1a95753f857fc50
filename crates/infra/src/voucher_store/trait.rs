use std::sync::Arc;

use thiserror::Error;

use munim_core::{Period, TenantId};
use munim_journal::{Voucher, VoucherId};

/// Voucher store operation error.
///
/// These are **infrastructure errors** (storage, uniqueness, lock state) as
/// opposed to the domain errors raised when a draft fails posting validation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A voucher with this id already exists in the tenant's log.
    #[error("duplicate voucher id: {0}")]
    DuplicateVoucher(String),

    /// The voucher failed the store's own append checks.
    #[error("invalid append: {0}")]
    InvalidAppend(String),

    /// A lock guarding the store was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    LockPoisoned,
}

/// Append-only, tenant-scoped voucher log.
///
/// ## Append Semantics
///
/// `append()`:
/// - Persists the whole voucher atomically (all lines or none; a voucher is
///   never partially visible)
/// - Rejects a duplicate voucher id within the tenant's log
/// - Rejects a voucher whose lines do not balance, as a final guard behind
///   posting validation
/// - Never mutates or deletes: corrections enter the log as new offsetting
///   vouchers
///
/// ## Scan Semantics
///
/// `scan()`:
/// - Returns the tenant's vouchers in date order; vouchers sharing a date
///   keep their append order
/// - Restarts from the beginning of the log on every call; nothing is
///   buffered between calls
/// - With a period, returns only vouchers dated inside it (both bounds
///   inclusive); an ordered backend can cut the walk off at the period end
/// - Returns an empty vector for a tenant that has never appended
///
/// A voucher appended concurrently with a scan may or may not appear in that
/// scan's result; it is always present in later scans.
pub trait VoucherStore: Send + Sync {
    /// Append one posted voucher to the tenant's log.
    fn append(&self, voucher: Voucher) -> Result<VoucherId, StoreError>;

    /// Scan the tenant's log, optionally bounded to a period.
    fn scan(
        &self,
        tenant_id: TenantId,
        period: Option<&Period>,
    ) -> Result<Vec<Voucher>, StoreError>;
}

impl<S> VoucherStore for Arc<S>
where
    S: VoucherStore + ?Sized,
{
    fn append(&self, voucher: Voucher) -> Result<VoucherId, StoreError> {
        (**self).append(voucher)
    }

    fn scan(
        &self,
        tenant_id: TenantId,
        period: Option<&Period>,
    ) -> Result<Vec<Voucher>, StoreError> {
        (**self).scan(tenant_id, period)
    }
}

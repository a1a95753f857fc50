use std::collections::HashMap;
use std::sync::RwLock;

use munim_core::{Period, TenantId};
use munim_journal::{Voucher, VoucherId};

use super::r#trait::{StoreError, VoucherStore};

/// In-memory append-only voucher log.
///
/// Intended for tests/dev and as the reference semantics for real storage
/// adapters. Each tenant's log is kept date-ordered at append time, so a
/// period scan is two binary searches and a slice copy.
#[derive(Debug, Default)]
pub struct InMemoryVoucherStore {
    tenants: RwLock<HashMap<TenantId, Vec<Voucher>>>,
}

impl InMemoryVoucherStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VoucherStore for InMemoryVoucherStore {
    fn append(&self, voucher: Voucher) -> Result<VoucherId, StoreError> {
        if !voucher.is_balanced() {
            return Err(StoreError::InvalidAppend(format!(
                "voucher {} does not balance",
                voucher.id
            )));
        }

        let mut tenants = self.tenants.write().map_err(|_| StoreError::LockPoisoned)?;
        let log = tenants.entry(voucher.tenant_id).or_default();

        if log.iter().any(|v| v.id == voucher.id) {
            return Err(StoreError::DuplicateVoucher(voucher.id.to_string()));
        }

        // Insert after every voucher dated on or before this one: the log
        // stays date-ordered and same-date vouchers keep append order.
        let at = log.partition_point(|v| v.date <= voucher.date);
        let id = voucher.id.clone();
        log.insert(at, voucher);
        Ok(id)
    }

    fn scan(
        &self,
        tenant_id: TenantId,
        period: Option<&Period>,
    ) -> Result<Vec<Voucher>, StoreError> {
        let tenants = self.tenants.read().map_err(|_| StoreError::LockPoisoned)?;
        let Some(log) = tenants.get(&tenant_id) else {
            return Ok(Vec::new());
        };

        let vouchers = match period {
            None => log.clone(),
            Some(p) => {
                let lo = log.partition_point(|v| v.date < p.start());
                let hi = log.partition_point(|v| v.date <= p.end());
                log[lo..hi].to_vec()
            }
        };
        Ok(vouchers)
    }
}

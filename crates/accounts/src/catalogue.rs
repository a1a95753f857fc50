//! The merged account catalogue and code resolution.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::nature::AccountNature;

/// Account identity + metadata.
///
/// Accounts referenced by posted vouchers are immutable; the catalogue only
/// ever grows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Account {
    pub code: String, // e.g. "1001"
    pub name: String, // e.g. "Cash in Hand"
    pub nature: AccountNature,
}

impl Account {
    pub fn new(code: impl Into<String>, name: impl Into<String>, nature: AccountNature) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            nature,
        }
    }
}

/// Per-tenant merged view over the system catalogue and the tenant's own
/// accounts.
///
/// Shadowing: a tenant account with the same code as a system account
/// overrides it. Within one source the first occurrence of a code wins and
/// later duplicates are dropped with a warning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalogue {
    accounts: BTreeMap<String, Account>,
}

impl Catalogue {
    pub fn merge(system: &[Account], tenant: &[Account]) -> Self {
        let mut accounts: BTreeMap<String, Account> = BTreeMap::new();
        let mut seen: BTreeSet<&str> = BTreeSet::new();

        for account in system {
            if !seen.insert(&account.code) {
                warn!(code = %account.code, "duplicate code in system catalogue, keeping first");
                continue;
            }
            accounts.insert(account.code.clone(), account.clone());
        }

        seen.clear();
        for account in tenant {
            if !seen.insert(&account.code) {
                warn!(code = %account.code, "duplicate code in tenant accounts, keeping first");
                continue;
            }
            // Tenant accounts shadow system accounts of the same code.
            accounts.insert(account.code.clone(), account.clone());
        }

        Self { accounts }
    }

    /// Look up an account by code. `None` means no source defines the code;
    /// callers decide whether that is a hard error (posting) or a skip
    /// (aggregation over historical data).
    pub fn resolve(&self, code: &str) -> Option<&Account> {
        self.accounts.get(code)
    }

    /// All accounts in code order.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

//! Report engine: one scan, one fold, any view.

use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;

use munim_accounts::{Catalogue, GstAccountSet};
use munim_core::{DomainError, LedgerQuery, TenantId};
use munim_infra::{StoreError, VoucherStore};
use munim_journal::Voucher;

use crate::advance_tax::{AdvanceTaxProjection, EntityType, TaxCredits, advance_tax};
use crate::balances::{AccountBalances, aggregate};
use crate::gst::{GstSummary, gst_summary};
use crate::profit_loss::{ProfitAndLoss, profit_and_loss};
use crate::statement::{AccountStatement, account_statement};
use crate::trial_balance::{TrialBalance, trial_balance};

/// Failure while deriving a report: either the store could not be read, or
/// the request itself was invalid.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Read-side facade over a voucher store and one tenant's merged catalogue.
///
/// The engine is bound to a single tenant at construction: the merged
/// catalogue it holds is that tenant's system+tenant view, and a catalogue
/// carrying one tenant's shadowed codes must never classify another tenant's
/// vouchers. Queries scoped to any other tenant are rejected outright.
///
/// Every request scans the log fresh (the store is the system of record) and
/// derives the requested view from a single fold, so concurrent requests
/// need no shared mutable state and different views of the same query cannot
/// disagree.
pub struct ReportEngine {
    store: Arc<dyn VoucherStore>,
    tenant_id: TenantId,
    catalogue: Catalogue,
    gst_accounts: GstAccountSet,
}

impl ReportEngine {
    pub fn new(store: Arc<dyn VoucherStore>, tenant_id: TenantId, catalogue: Catalogue) -> Self {
        Self {
            store,
            tenant_id,
            catalogue,
            gst_accounts: GstAccountSet::default(),
        }
    }

    /// Override the default GST account classification.
    pub fn with_gst_accounts(mut self, gst_accounts: GstAccountSet) -> Self {
        self.gst_accounts = gst_accounts;
        self
    }

    pub fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    fn ensure_tenant(&self, query: &LedgerQuery) -> Result<(), ReportError> {
        if query.tenant_id() != self.tenant_id {
            return Err(DomainError::invariant("tenant mismatch").into());
        }
        Ok(())
    }

    fn scan(&self, query: &LedgerQuery) -> Result<Vec<Voucher>, ReportError> {
        self.ensure_tenant(query)?;
        Ok(self.store.scan(self.tenant_id, query.period())?)
    }

    /// The raw fold, for callers composing their own views.
    pub fn account_balances(&self, query: &LedgerQuery) -> Result<AccountBalances, ReportError> {
        let vouchers = self.scan(query)?;
        Ok(aggregate(&vouchers, &self.catalogue, query))
    }

    pub fn trial_balance(&self, query: &LedgerQuery) -> Result<TrialBalance, ReportError> {
        let balances = self.account_balances(query)?;
        Ok(trial_balance(&balances, &self.catalogue))
    }

    pub fn profit_and_loss(&self, query: &LedgerQuery) -> Result<ProfitAndLoss, ReportError> {
        let balances = self.account_balances(query)?;
        Ok(profit_and_loss(&balances, &self.catalogue))
    }

    pub fn gst_summary(&self, query: &LedgerQuery) -> Result<GstSummary, ReportError> {
        let vouchers = self.scan(query)?;
        let balances = aggregate(&vouchers, &self.catalogue, query);
        Ok(gst_summary(
            &vouchers,
            &balances,
            &self.catalogue,
            &self.gst_accounts,
        ))
    }

    /// Project advance tax from the period's net profit. The query must
    /// carry a period; annualization needs to know how far into the year
    /// the profit reaches.
    pub fn advance_tax(
        &self,
        query: &LedgerQuery,
        entity: EntityType,
        credits: TaxCredits,
    ) -> Result<AdvanceTaxProjection, ReportError> {
        self.ensure_tenant(query)?;
        let period = *query
            .period()
            .ok_or_else(|| DomainError::validation("advance tax projection needs a period"))?;
        let pnl = self.profit_and_loss(query)?;

        let mut projection = advance_tax(entity, pnl.net_profit, &period, credits);
        projection.warnings = pnl.warnings;
        Ok(projection)
    }

    /// Statement for one account. With a period on the query, everything
    /// dated before it folds into the opening balance; without one, the
    /// statement runs from the log head with a zero opening.
    pub fn account_statement(
        &self,
        query: &LedgerQuery,
        code: &str,
    ) -> Result<AccountStatement, ReportError> {
        self.ensure_tenant(query)?;
        let account = self
            .catalogue
            .resolve(code)
            .ok_or_else(|| DomainError::unresolvable_account(code))?;

        let log = self.store.scan(self.tenant_id, None)?;

        let (opening, in_range) = match query.period() {
            None => (Decimal::ZERO, log),
            Some(period) => {
                let mut opening = Decimal::ZERO;
                let mut in_range = Vec::new();
                for voucher in log {
                    if voucher.date < period.start() {
                        for line in voucher.lines.iter().filter(|l| l.account_code == code) {
                            opening += if account.nature.increases_on_debit() {
                                line.debit - line.credit
                            } else {
                                line.credit - line.debit
                            };
                        }
                    } else if period.contains(voucher.date) {
                        in_range.push(voucher);
                    } else {
                        // The scan is date-ordered; nothing after the period
                        // end matters.
                        break;
                    }
                }
                (opening, in_range)
            }
        };

        Ok(account_statement(&in_range, &self.catalogue, code, opening)?)
    }
}

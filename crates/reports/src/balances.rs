//! The balance aggregator: fold vouchers into signed per-account balances.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use munim_accounts::Catalogue;
use munim_core::LedgerQuery;
use munim_journal::Voucher;

/// Data-quality findings accumulated while deriving a report.
///
/// Reports render these as caveats instead of presenting silently wrong
/// numbers; the log may hold lines against codes that were never defined or
/// have since been shadowed into a different meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWarnings {
    /// Lines skipped because their account code did not resolve.
    pub skipped_lines: usize,
    /// The distinct codes that failed to resolve.
    pub unresolved_codes: BTreeSet<String>,
    /// Debit and credit totals did not close in the trial balance.
    pub out_of_balance: bool,
}

impl ReportWarnings {
    pub fn is_clean(&self) -> bool {
        self.skipped_lines == 0 && self.unresolved_codes.is_empty() && !self.out_of_balance
    }
}

/// Signed per-account balances for one query.
///
/// Derived on demand and thrown away; the voucher log is the only system of
/// record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountBalances {
    /// Balance per account code, signed under the account's own convention.
    pub balances: BTreeMap<String, Decimal>,
    pub warnings: ReportWarnings,
}

impl AccountBalances {
    /// Zero for accounts the fold never touched.
    pub fn balance(&self, code: &str) -> Decimal {
        self.balances.get(code).copied().unwrap_or(Decimal::ZERO)
    }
}

/// Fold vouchers into signed balances under `query`'s scope.
///
/// Sign convention: debit-increasing natures accumulate `debit - credit`,
/// credit-increasing natures accumulate `credit - debit`. A healthy account
/// therefore carries a positive balance; negative means it moved against its
/// nature.
///
/// The fold is total over messy history: lines whose code does not resolve
/// are skipped and counted, lines with both sides set net through the same
/// formula, and vouchers from another tenant are ignored outright. It is a
/// pure function of its inputs, so re-running it is always safe.
pub fn aggregate(
    vouchers: &[Voucher],
    catalogue: &Catalogue,
    query: &LedgerQuery,
) -> AccountBalances {
    aggregate_from(AccountBalances::default(), vouchers, catalogue, query)
}

/// Fold a residual voucher sequence on top of precomputed opening balances.
///
/// Callers that keep per-period snapshots fold only the period's vouchers on
/// top of the snapshot instead of walking the log since inception.
pub fn aggregate_from(
    opening: AccountBalances,
    vouchers: &[Voucher],
    catalogue: &Catalogue,
    query: &LedgerQuery,
) -> AccountBalances {
    let mut acc = opening;

    for voucher in vouchers {
        if voucher.tenant_id != query.tenant_id() {
            warn!(voucher = %voucher.id, "ignoring voucher from another tenant");
            continue;
        }
        if !query.covers_date(voucher.date) {
            continue;
        }

        for line in &voucher.lines {
            if !query.includes_account(&line.account_code) {
                continue;
            }
            let Some(account) = catalogue.resolve(&line.account_code) else {
                warn!(
                    voucher = %voucher.id,
                    code = %line.account_code,
                    "skipping line with unresolvable account code"
                );
                acc.warnings.skipped_lines += 1;
                acc.warnings.unresolved_codes.insert(line.account_code.clone());
                continue;
            };

            let delta = if account.nature.increases_on_debit() {
                line.debit - line.credit
            } else {
                line.credit - line.debit
            };
            *acc.balances
                .entry(line.account_code.clone())
                .or_insert(Decimal::ZERO) += delta;
        }
    }

    acc
}

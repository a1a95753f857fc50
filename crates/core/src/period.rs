//! Accounting periods and the per-request ledger query.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::id::TenantId;

/// Inclusive date range scoping voucher scans and report folds.
///
/// Indian fiscal-year helpers live here because the tax reports all reason
/// in fiscal years (Apr 1 through Mar 31).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    start: NaiveDate,
    end: NaiveDate,
}

impl Period {
    pub fn new(start: NaiveDate, end: NaiveDate) -> DomainResult<Self> {
        if start > end {
            return Err(DomainError::validation(format!(
                "period start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// The fiscal year beginning Apr 1 of `start_year`.
    pub fn fiscal_year(start_year: i32) -> Self {
        // Apr 1 and Mar 31 exist in every year chrono can represent.
        let start = NaiveDate::from_ymd_opt(start_year, 4, 1).expect("Apr 1 is a valid date");
        let end = NaiveDate::from_ymd_opt(start_year + 1, 3, 31).expect("Mar 31 is a valid date");
        Self { start, end }
    }

    /// The fiscal year containing `date`.
    pub fn fiscal_year_containing(date: NaiveDate) -> Self {
        let start_year = if date.month() >= 4 {
            date.year()
        } else {
            date.year() - 1
        };
        Self::fiscal_year(start_year)
    }

    /// Fiscal-year-to-date: Apr 1 of the fiscal year containing `date`,
    /// through `date` itself. This is the period the advance-tax projection
    /// annualizes from.
    pub fn year_to(date: NaiveDate) -> Self {
        let start = Self::fiscal_year_containing(date).start;
        Self { start, end: date }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Both bounds are inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Calendar months touched by this period, counting partial months as
    /// whole. Never less than 1, so annualization cannot divide by zero.
    pub fn months_elapsed(&self) -> u32 {
        let months = (self.end.year() - self.start.year()) * 12
            + self.end.month() as i32
            - self.start.month() as i32
            + 1;
        months.max(1) as u32
    }
}

/// Immutable per-request read scope: tenant, optional period, optional
/// account filter.
///
/// Built once at the request boundary and passed explicitly down the read
/// path. Concurrent reports never share mutable filter state; each request
/// carries its own query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerQuery {
    tenant_id: TenantId,
    period: Option<Period>,
    account_filter: Option<BTreeSet<String>>,
}

impl LedgerQuery {
    /// Query covering the tenant's whole log, all accounts.
    pub fn for_tenant(tenant_id: TenantId) -> Self {
        Self {
            tenant_id,
            period: None,
            account_filter: None,
        }
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    pub fn with_accounts<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.account_filter = Some(codes.into_iter().map(Into::into).collect());
        self
    }

    pub fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    pub fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    /// No period means the whole log.
    pub fn covers_date(&self, date: NaiveDate) -> bool {
        self.period.is_none_or(|p| p.contains(date))
    }

    /// No filter means every account.
    pub fn includes_account(&self, code: &str) -> bool {
        match &self.account_filter {
            None => true,
            Some(filter) => filter.contains(code),
        }
    }
}

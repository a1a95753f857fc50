//! Advance-tax projection.
//!
//! Annualizes the period's net profit, applies the entity's slab table plus
//! cess, nets off TDS already deducted, and spreads what remains across the
//! statutory installment schedule. Everything here is a pure function; the
//! profit figure comes from the P&L fold and the credits come from outside.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use munim_core::Period;

use crate::balances::ReportWarnings;

/// Taxpayer entity type; selects the slab table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    IndividualOldRegime,
    IndividualNewRegime,
    Company,
    Firm,
}

/// One progressive band: income up to `upper` (`None` = unbounded) taxed at
/// `rate`. Tables are ascending; each band taxes only the slice of income
/// inside it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxSlab {
    pub upper: Option<Decimal>,
    pub rate: Decimal,
}

fn slab(upper_rupees: Option<i64>, rate_percent: i64) -> TaxSlab {
    TaxSlab {
        upper: upper_rupees.map(Decimal::from),
        rate: Decimal::new(rate_percent, 2),
    }
}

impl EntityType {
    /// Slab table in ascending band order. Flat-rate entities are a single
    /// unbounded band.
    pub fn slabs(self) -> Vec<TaxSlab> {
        match self {
            Self::IndividualNewRegime => vec![
                slab(Some(300_000), 0),
                slab(Some(600_000), 5),
                slab(Some(900_000), 10),
                slab(Some(1_200_000), 15),
                slab(Some(1_500_000), 20),
                slab(None, 30),
            ],
            Self::IndividualOldRegime => vec![
                slab(Some(250_000), 0),
                slab(Some(500_000), 5),
                slab(Some(1_000_000), 20),
                slab(None, 30),
            ],
            Self::Company => vec![slab(None, 25)],
            Self::Firm => vec![slab(None, 30)],
        }
    }

    /// Health and education cess, applied on the slab tax.
    pub fn cess_rate(self) -> Decimal {
        Decimal::new(4, 2)
    }
}

/// Apply a slab table to a taxable income. Non-positive income is zero tax.
pub fn slab_tax(taxable: Decimal, slabs: &[TaxSlab]) -> Decimal {
    if taxable <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let mut tax = Decimal::ZERO;
    let mut lower = Decimal::ZERO;
    for band in slabs {
        if taxable <= lower {
            break;
        }
        let upper = match band.upper {
            Some(u) => u.min(taxable),
            None => taxable,
        };
        if upper > lower {
            tax += (upper - lower) * band.rate;
        }
        lower = match band.upper {
            Some(u) => u,
            None => break,
        };
    }
    tax
}

/// Figures the ledger does not know: deductions claimed under the applicable
/// chapter, and TDS already deducted by counterparties. Consumed as opaque
/// amounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxCredits {
    pub deductions: Decimal,
    pub tds_deducted: Decimal,
}

/// One statutory installment: the cumulative share of the year's advance tax
/// due by a date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    pub due_by: NaiveDate,
    pub cumulative_rate: Decimal,
    pub cumulative_amount: Decimal,
}

/// Advance-tax projection for a fiscal-year-to-date period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvanceTaxProjection {
    pub entity: EntityType,
    pub net_profit_to_date: Decimal,
    pub months_elapsed: u32,
    pub annualized_income: Decimal,
    pub taxable_income: Decimal,
    pub tax_before_cess: Decimal,
    pub cess: Decimal,
    pub total_tax: Decimal,
    pub tds_credit: Decimal,
    pub advance_tax_payable: Decimal,
    pub installments: Vec<Installment>,
    pub warnings: ReportWarnings,
}

/// Project the year's advance tax from a partial-year profit.
///
/// Annualization is linear over the period's elapsed months; a six-month
/// profit is doubled. The period is expected to be fiscal-year-to-date
/// ([`Period::year_to`]); the installment due dates come from the fiscal
/// year containing its start.
pub fn advance_tax(
    entity: EntityType,
    net_profit_to_date: Decimal,
    period: &Period,
    credits: TaxCredits,
) -> AdvanceTaxProjection {
    let months_elapsed = period.months_elapsed();
    let annualized_income =
        net_profit_to_date * Decimal::from(12u32) / Decimal::from(months_elapsed);
    let taxable_income = (annualized_income - credits.deductions).max(Decimal::ZERO);

    let tax_before_cess = slab_tax(taxable_income, &entity.slabs());
    let cess = tax_before_cess * entity.cess_rate();
    let total_tax = tax_before_cess + cess;
    let advance_tax_payable = (total_tax - credits.tds_deducted).max(Decimal::ZERO);

    let fiscal = Period::fiscal_year_containing(period.start());
    let installments = installment_schedule(&fiscal, advance_tax_payable);

    AdvanceTaxProjection {
        entity,
        net_profit_to_date,
        months_elapsed,
        annualized_income,
        taxable_income,
        tax_before_cess,
        cess,
        total_tax,
        tds_credit: credits.tds_deducted,
        advance_tax_payable,
        installments,
        warnings: ReportWarnings::default(),
    }
}

/// Cumulative 15% / 45% / 75% / 100% by Jun 15, Sep 15, Dec 15 and Mar 15.
fn installment_schedule(fiscal: &Period, payable: Decimal) -> Vec<Installment> {
    let year = fiscal.start().year();
    [
        (year, 6, 15, 15),
        (year, 9, 15, 45),
        (year, 12, 15, 75),
        (year + 1, 3, 15, 100),
    ]
    .into_iter()
    .map(|(y, m, d, percent)| {
        let cumulative_rate = Decimal::new(percent, 2);
        Installment {
            // Mid-month due dates exist in every year.
            due_by: NaiveDate::from_ymd_opt(y, m, d).expect("due date is a valid date"),
            cumulative_rate,
            cumulative_amount: payable * cumulative_rate,
        }
    })
    .collect()
}

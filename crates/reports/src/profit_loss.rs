//! Trading and profit & loss statement.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use munim_accounts::{AccountNature, Catalogue};

use crate::balances::{AccountBalances, ReportWarnings};

/// One account's contribution to a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PnlRow {
    pub code: String,
    pub name: String,
    pub amount: Decimal,
}

/// A grouped section with its net total. Contra balances (an account that
/// moved against its nature) stay signed, so the total nets them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PnlSection {
    pub rows: Vec<PnlRow>,
    pub total: Decimal,
}

/// Two-tier statement in the Indian presentation: a trading section down to
/// gross profit, then the P&L section down to net profit.
///
/// Gross profit considers direct revenue against cost of goods sold only;
/// other income enters below the trading section and affects net profit
/// alone. The `*_total` fields are the T-account display totals: both columns
/// of a section show the larger side, which is how the statement is drawn on
/// paper, not an extra invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitAndLoss {
    pub revenue: PnlSection,
    pub cost_of_goods_sold: PnlSection,
    pub gross_profit: Decimal,
    pub other_income: PnlSection,
    pub expenses: PnlSection,
    pub net_profit: Decimal,
    pub trading_total: Decimal,
    pub pnl_total: Decimal,
    pub warnings: ReportWarnings,
}

fn section(
    balances: &AccountBalances,
    catalogue: &Catalogue,
    nature: AccountNature,
) -> PnlSection {
    let mut rows = Vec::new();
    let mut total = Decimal::ZERO;

    for (code, balance) in &balances.balances {
        if balance.is_zero() {
            continue;
        }
        let Some(account) = catalogue.resolve(code) else {
            continue;
        };
        if account.nature != nature {
            continue;
        }
        total += *balance;
        rows.push(PnlRow {
            code: code.clone(),
            name: account.name.clone(),
            amount: *balance,
        });
    }

    PnlSection { rows, total }
}

/// Derive the statement from a finished fold.
pub fn profit_and_loss(balances: &AccountBalances, catalogue: &Catalogue) -> ProfitAndLoss {
    let revenue = section(balances, catalogue, AccountNature::Revenue);
    let cost_of_goods_sold = section(balances, catalogue, AccountNature::CostOfGoodsSold);
    let other_income = section(balances, catalogue, AccountNature::OtherIncome);
    let expenses = section(balances, catalogue, AccountNature::Expense);

    let gross_profit = revenue.total - cost_of_goods_sold.total;
    let net_profit = gross_profit + other_income.total - expenses.total;

    let trading_total = revenue.total.max(cost_of_goods_sold.total);
    let pnl_credit_side = gross_profit.max(Decimal::ZERO) + other_income.total;
    let pnl_debit_side = (-gross_profit).max(Decimal::ZERO) + expenses.total;
    let pnl_total = pnl_credit_side.max(pnl_debit_side);

    ProfitAndLoss {
        revenue,
        cost_of_goods_sold,
        gross_profit,
        other_income,
        expenses,
        net_profit,
        trading_total,
        pnl_total,
        warnings: balances.warnings.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balances::aggregate;
    use chrono::NaiveDate;
    use munim_accounts::system_catalogue;
    use munim_core::{LedgerQuery, TenantId};
    use munim_journal::{Line, Voucher, VoucherId, VoucherKind};
    use rust_decimal_macros::dec;

    fn catalogue() -> Catalogue {
        Catalogue::merge(&system_catalogue(), &[])
    }

    fn voucher(id: &str, tenant_id: TenantId, lines: Vec<Line>) -> Voucher {
        Voucher {
            id: VoucherId::new(id),
            kind: VoucherKind::Other,
            tenant_id,
            date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            narration: "Test voucher".to_string(),
            lines,
            party: None,
        }
    }

    fn statement(vouchers: &[Voucher], tenant: TenantId) -> ProfitAndLoss {
        let balances = aggregate(vouchers, &catalogue(), &LedgerQuery::for_tenant(tenant));
        profit_and_loss(&balances, &catalogue())
    }

    #[test]
    fn gross_profit_ignores_other_income_net_profit_includes_it() {
        let tenant = TenantId::new();
        let vouchers = vec![
            // Sales 10,000 for cash.
            voucher(
                "INV-1",
                tenant,
                vec![
                    Line::debit("1001", dec!(10000.00)),
                    Line::credit("4001", dec!(10000.00)),
                ],
            ),
            // Purchases 6,000 for cash.
            voucher(
                "BILL-1",
                tenant,
                vec![
                    Line::debit("5001", dec!(6000.00)),
                    Line::credit("1001", dec!(6000.00)),
                ],
            ),
            // Interest income 500.
            voucher(
                "JV-1",
                tenant,
                vec![
                    Line::debit("1101", dec!(500.00)),
                    Line::credit("4101", dec!(500.00)),
                ],
            ),
            // Rent 1,200.
            voucher(
                "JV-2",
                tenant,
                vec![
                    Line::debit("6001", dec!(1200.00)),
                    Line::credit("1001", dec!(1200.00)),
                ],
            ),
        ];

        let pnl = statement(&vouchers, tenant);

        assert_eq!(pnl.gross_profit, dec!(4000.00));
        assert_eq!(pnl.other_income.total, dec!(500.00));
        assert_eq!(pnl.net_profit, dec!(3300.00));
        assert_eq!(pnl.trading_total, dec!(10000.00));
        // Credit side: 4,000 gross profit + 500 other income.
        assert_eq!(pnl.pnl_total, dec!(4500.00));
    }

    #[test]
    fn gross_loss_carries_to_the_debit_side() {
        let tenant = TenantId::new();
        let vouchers = vec![
            voucher(
                "INV-1",
                tenant,
                vec![
                    Line::debit("1001", dec!(2000.00)),
                    Line::credit("4001", dec!(2000.00)),
                ],
            ),
            voucher(
                "BILL-1",
                tenant,
                vec![
                    Line::debit("5001", dec!(3500.00)),
                    Line::credit("1001", dec!(3500.00)),
                ],
            ),
        ];

        let pnl = statement(&vouchers, tenant);

        assert_eq!(pnl.gross_profit, dec!(-1500.00));
        assert_eq!(pnl.net_profit, dec!(-1500.00));
        // Trading columns both show the larger (cost) side.
        assert_eq!(pnl.trading_total, dec!(3500.00));
        assert_eq!(pnl.pnl_total, dec!(1500.00));
    }

    #[test]
    fn contra_revenue_nets_inside_the_section() {
        let tenant = TenantId::new();
        let vouchers = vec![
            voucher(
                "INV-1",
                tenant,
                vec![
                    Line::debit("1201", dec!(5000.00)),
                    Line::credit("4001", dec!(5000.00)),
                ],
            ),
            // Sales return posted against the same revenue account.
            voucher(
                "CN-1",
                tenant,
                vec![
                    Line::debit("4001", dec!(700.00)),
                    Line::credit("1201", dec!(700.00)),
                ],
            ),
        ];

        let pnl = statement(&vouchers, tenant);

        assert_eq!(pnl.revenue.total, dec!(4300.00));
        assert_eq!(pnl.gross_profit, dec!(4300.00));
    }

    #[test]
    fn empty_log_yields_a_zero_statement() {
        let pnl = statement(&[], TenantId::new());

        assert_eq!(pnl.net_profit, Decimal::ZERO);
        assert_eq!(pnl.trading_total, Decimal::ZERO);
        assert!(pnl.revenue.rows.is_empty());
    }
}

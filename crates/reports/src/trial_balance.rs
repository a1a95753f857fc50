//! Trial balance derivation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use munim_accounts::{AccountNature, Catalogue};

use crate::balances::{AccountBalances, ReportWarnings};

/// One row: an account with a non-zero signed balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    pub code: String,
    pub name: String,
    pub nature: AccountNature,
    /// Signed under the account's own convention; negative means the account
    /// moved against its nature.
    pub balance: Decimal,
}

/// Every account with a non-zero balance, plus the two side totals.
///
/// For a log of balanced vouchers with fully resolvable codes the totals
/// close exactly. A mismatch is surfaced loudly (flag plus error log), never
/// silently dropped: the usual cause is skipped lines against unresolvable
/// codes, which take one side of their voucher out of the fold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialBalance {
    pub rows: Vec<TrialBalanceRow>,
    pub debit_total: Decimal,
    pub credit_total: Decimal,
    pub is_balanced: bool,
    pub warnings: ReportWarnings,
}

/// Derive the trial balance from a finished fold. Rows come out in code
/// order because the fold keys them that way.
pub fn trial_balance(balances: &AccountBalances, catalogue: &Catalogue) -> TrialBalance {
    let mut rows = Vec::new();
    let mut debit_total = Decimal::ZERO;
    let mut credit_total = Decimal::ZERO;
    let mut warnings = balances.warnings.clone();

    for (code, balance) in &balances.balances {
        if balance.is_zero() {
            continue;
        }
        // Opening snapshots may carry codes the current catalogue no longer
        // defines; those rows cannot be sided and are reported, not shown.
        let Some(account) = catalogue.resolve(code) else {
            warn!(%code, "dropping trial balance row with unresolvable code");
            warnings.unresolved_codes.insert(code.clone());
            continue;
        };

        if account.nature.increases_on_debit() {
            debit_total += *balance;
        } else {
            credit_total += *balance;
        }
        rows.push(TrialBalanceRow {
            code: code.clone(),
            name: account.name.clone(),
            nature: account.nature,
            balance: *balance,
        });
    }

    let is_balanced = debit_total == credit_total;
    if !is_balanced {
        warnings.out_of_balance = true;
        error!(%debit_total, %credit_total, "trial balance does not close");
    }

    TrialBalance {
        rows,
        debit_total,
        credit_total,
        is_balanced,
        warnings,
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
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn test_tenant_id() -> TenantId {
        TenantId::new()
    }

    fn catalogue() -> Catalogue {
        Catalogue::merge(&system_catalogue(), &[])
    }

    fn voucher(id: &str, tenant_id: TenantId, lines: Vec<Line>) -> Voucher {
        Voucher {
            id: VoucherId::new(id),
            kind: VoucherKind::Other,
            tenant_id,
            date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            narration: "Test voucher".to_string(),
            lines,
            party: None,
        }
    }

    #[test]
    fn closes_for_a_balanced_log() {
        let tenant = test_tenant_id();
        let vouchers = vec![
            voucher(
                "JV-1",
                tenant,
                vec![
                    Line::debit("1001", dec!(1000.00)),
                    Line::credit("3001", dec!(1000.00)),
                ],
            ),
            voucher(
                "JV-2",
                tenant,
                vec![
                    Line::debit("6001", dec!(200.00)),
                    Line::credit("1001", dec!(200.00)),
                ],
            ),
        ];

        let balances = aggregate(&vouchers, &catalogue(), &LedgerQuery::for_tenant(tenant));
        let tb = trial_balance(&balances, &catalogue());

        assert!(tb.is_balanced);
        assert_eq!(tb.debit_total, dec!(1000.00));
        assert_eq!(tb.credit_total, dec!(1000.00));
        assert!(!tb.warnings.out_of_balance);
    }

    #[test]
    fn zero_balance_accounts_do_not_appear() {
        let tenant = test_tenant_id();
        // Cash goes up 100 and back down 100.
        let vouchers = vec![
            voucher(
                "JV-1",
                tenant,
                vec![
                    Line::debit("1001", dec!(100.00)),
                    Line::credit("3001", dec!(100.00)),
                ],
            ),
            voucher(
                "JV-2",
                tenant,
                vec![
                    Line::debit("6001", dec!(100.00)),
                    Line::credit("1001", dec!(100.00)),
                ],
            ),
        ];

        let balances = aggregate(&vouchers, &catalogue(), &LedgerQuery::for_tenant(tenant));
        let tb = trial_balance(&balances, &catalogue());

        assert!(tb.rows.iter().all(|r| r.code != "1001"));
        assert!(tb.is_balanced);
    }

    #[test]
    fn skipped_lines_unbalance_the_report_and_flag_it() {
        let tenant = test_tenant_id();
        let vouchers = vec![voucher(
            "JV-X",
            tenant,
            vec![
                Line::debit("9999", dec!(100.00)),
                Line::credit("4001", dec!(100.00)),
            ],
        )];

        let balances = aggregate(&vouchers, &catalogue(), &LedgerQuery::for_tenant(tenant));
        let tb = trial_balance(&balances, &catalogue());

        assert!(!tb.is_balanced);
        assert!(tb.warnings.out_of_balance);
        assert_eq!(tb.warnings.skipped_lines, 1);
        assert_eq!(tb.credit_total, dec!(100.00));
        assert_eq!(tb.debit_total, Decimal::ZERO);
    }

    #[test]
    fn rows_come_out_in_code_order() {
        let tenant = test_tenant_id();
        let vouchers = vec![voucher(
            "JV-1",
            tenant,
            vec![
                Line::debit("6001", dec!(50.00)),
                Line::debit("1001", dec!(50.00)),
                Line::credit("3001", dec!(100.00)),
            ],
        )];

        let balances = aggregate(&vouchers, &catalogue(), &LedgerQuery::for_tenant(tenant));
        let tb = trial_balance(&balances, &catalogue());
        let codes: Vec<&str> = tb.rows.iter().map(|r| r.code.as_str()).collect();

        assert_eq!(codes, ["1001", "3001", "6001"]);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: for any sequence of balanced two-line vouchers over
        /// resolvable codes, the trial balance closes exactly.
        #[test]
        fn closes_for_random_balanced_vouchers(
            moves in prop::collection::vec(
                (0usize..6, 0usize..6, 1i64..10_000_000i64),
                1..40
            )
        ) {
            // A mix of debit-increasing and credit-increasing natures.
            let codes = ["1001", "1101", "6001", "4001", "2101", "3001"];
            let tenant = test_tenant_id();

            let vouchers: Vec<Voucher> = moves
                .iter()
                .enumerate()
                .map(|(i, (from, to, paise))| {
                    let amount = Decimal::new(*paise, 2);
                    voucher(
                        &format!("JV-{i}"),
                        tenant,
                        vec![
                            Line::debit(codes[*from], amount),
                            Line::credit(codes[*to], amount),
                        ],
                    )
                })
                .collect();

            let balances = aggregate(&vouchers, &catalogue(), &LedgerQuery::for_tenant(tenant));
            let tb = trial_balance(&balances, &catalogue());

            prop_assert!(tb.is_balanced);
            prop_assert_eq!(tb.debit_total, tb.credit_total);
        }
    }
}

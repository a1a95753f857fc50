//! The shared system catalogue and well-known account codes.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalogue::Account;
use crate::nature::AccountNature;

/// Well-known system codes the report derivers rely on.
pub mod codes {
    pub const CASH: &str = "1001";
    pub const BANK: &str = "1101";
    pub const SUNDRY_DEBTORS: &str = "1201";
    pub const GST_INPUT_CREDIT: &str = "1301";
    pub const SUNDRY_CREDITORS: &str = "2101";
    /// Output tax payable.
    pub const GST_PAYABLE: &str = "2201";
    /// Second code named "GST Payable". Early tenants posted against it and
    /// the log is append-only, so it stays live and stays classified as
    /// output tax alongside [`GST_PAYABLE`].
    pub const GST_PAYABLE_LEGACY: &str = "2208";
    pub const TDS_RECEIVABLE: &str = "1302";
    pub const SALES: &str = "4001";
    pub const PURCHASES: &str = "5001";
}

/// The catalogue every tenant sees before their own accounts are merged in.
///
/// Codes follow the usual Indian numbering: 1xxx assets, 2xxx liabilities,
/// 3xxx equity, 4xxx income, 5xxx direct costs, 6xxx expenses.
pub fn system_catalogue() -> Vec<Account> {
    use AccountNature::*;

    vec![
        Account::new(codes::CASH, "Cash in Hand", Cash),
        Account::new("1002", "Petty Cash", Cash),
        Account::new(codes::BANK, "Bank Account", Bank),
        Account::new(codes::SUNDRY_DEBTORS, "Sundry Debtors", CurrentAsset),
        Account::new(codes::GST_INPUT_CREDIT, "GST Input Credit", CurrentAsset),
        Account::new(codes::TDS_RECEIVABLE, "TDS Receivable", CurrentAsset),
        Account::new("1401", "Inventory", CurrentAsset),
        Account::new("1501", "Plant & Machinery", FixedAsset),
        Account::new("1502", "Furniture & Fixtures", FixedAsset),
        Account::new("1601", "Investments", Investment),
        Account::new(codes::SUNDRY_CREDITORS, "Sundry Creditors", CurrentLiability),
        Account::new(codes::GST_PAYABLE, "GST Payable", CurrentLiability),
        Account::new(codes::GST_PAYABLE_LEGACY, "GST Payable", CurrentLiability),
        Account::new("2301", "TDS Payable", CurrentLiability),
        Account::new("2401", "Term Loan", LongTermLiability),
        Account::new("3001", "Capital Account", Equity),
        Account::new("3101", "Reserves & Surplus", Equity),
        Account::new(codes::SALES, "Sales", Revenue),
        Account::new("4101", "Interest Income", OtherIncome),
        Account::new("4102", "Commission Received", OtherIncome),
        Account::new(codes::PURCHASES, "Purchases", CostOfGoodsSold),
        Account::new("5101", "Freight Inward", CostOfGoodsSold),
        Account::new("6001", "Rent", Expense),
        Account::new("6002", "Salaries", Expense),
        Account::new("6003", "Electricity", Expense),
        Account::new("6004", "Telephone & Internet", Expense),
        Account::new("6005", "Bank Charges", Expense),
        Account::new("6101", "Miscellaneous Expenses", Expense),
    ]
}

/// Which account codes hold GST amounts, split by direction.
///
/// Output tax accrues on outward supplies, input credit on inward supplies.
/// Tenants that add their own tax ledgers (IGST/CGST/SGST splits) extend
/// these sets alongside their catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GstAccountSet {
    pub output: BTreeSet<String>,
    pub input: BTreeSet<String>,
}

impl Default for GstAccountSet {
    fn default() -> Self {
        Self {
            output: [codes::GST_PAYABLE, codes::GST_PAYABLE_LEGACY]
                .into_iter()
                .map(String::from)
                .collect(),
            input: [codes::GST_INPUT_CREDIT].into_iter().map(String::from).collect(),
        }
    }
}

impl GstAccountSet {
    pub fn is_output(&self, code: &str) -> bool {
        self.output.contains(code)
    }

    pub fn is_input(&self, code: &str) -> bool {
        self.input.contains(code)
    }

    pub fn is_tax_account(&self, code: &str) -> bool {
        self.is_output(code) || self.is_input(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::Catalogue;

    #[test]
    fn system_catalogue_has_no_duplicate_codes() {
        let accounts = system_catalogue();
        let catalogue = Catalogue::merge(&accounts, &[]);
        assert_eq!(catalogue.len(), accounts.len());
    }

    #[test]
    fn both_gst_payable_codes_resolve_as_liabilities() {
        let catalogue = Catalogue::merge(&system_catalogue(), &[]);
        for code in [codes::GST_PAYABLE, codes::GST_PAYABLE_LEGACY] {
            let account = catalogue.resolve(code).unwrap();
            assert_eq!(account.name, "GST Payable");
            assert_eq!(account.nature, AccountNature::CurrentLiability);
        }
    }

    #[test]
    fn default_gst_set_covers_the_legacy_payable_code() {
        let set = GstAccountSet::default();
        assert!(set.is_output(codes::GST_PAYABLE));
        assert!(set.is_output(codes::GST_PAYABLE_LEGACY));
        assert!(set.is_input(codes::GST_INPUT_CREDIT));
        assert!(!set.is_tax_account(codes::SALES));
    }
}

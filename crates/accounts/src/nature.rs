//! Account natures and the debit/credit sign rule.

use serde::{Deserialize, Serialize};

/// Account nature: decides which side increases the balance and how the
/// reports group the account.
///
/// Finer-grained than the five classical kinds because the derived reports
/// need the distinctions: Cash and Bank drive narration inference, OtherIncome
/// lands below the trading section, CostOfGoodsSold sits above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountNature {
    FixedAsset,
    Investment,
    CurrentAsset,
    Cash,
    Bank,
    LongTermLiability,
    CurrentLiability,
    Equity,
    Revenue,
    OtherIncome,
    CostOfGoodsSold,
    Expense,
}

impl AccountNature {
    /// Whether a debit increases this account's balance.
    ///
    /// Asset and expense natures grow on debit; liability, equity and income
    /// natures grow on credit. Every derived report leans on this one rule;
    /// inverting it flips the sign of everything downstream.
    pub fn increases_on_debit(self) -> bool {
        matches!(
            self,
            Self::FixedAsset
                | Self::Investment
                | Self::CurrentAsset
                | Self::Cash
                | Self::Bank
                | Self::CostOfGoodsSold
                | Self::Expense
        )
    }

    pub fn is_asset(self) -> bool {
        matches!(
            self,
            Self::FixedAsset | Self::Investment | Self::CurrentAsset | Self::Cash | Self::Bank
        )
    }

    pub fn is_liability(self) -> bool {
        matches!(self, Self::LongTermLiability | Self::CurrentLiability)
    }

    /// Income side of the P&L (sales plus other income).
    pub fn is_income(self) -> bool {
        matches!(self, Self::Revenue | Self::OtherIncome)
    }

    /// Cost side of the P&L (direct costs plus operating expenses).
    pub fn is_cost(self) -> bool {
        matches!(self, Self::CostOfGoodsSold | Self::Expense)
    }
}

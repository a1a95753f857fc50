//! Per-account statement: the ledger-folio view.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use munim_accounts::{AccountNature, Catalogue};
use munim_core::{DomainError, DomainResult};
use munim_journal::{Voucher, VoucherId};

/// One voucher's effect on the account, with the balance after it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementEntry {
    pub voucher_id: VoucherId,
    pub date: NaiveDate,
    pub narration: String,
    pub debit: Decimal,
    pub credit: Decimal,
    pub running_balance: Decimal,
}

/// An account's movements over a period, walked in log order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountStatement {
    pub code: String,
    pub name: String,
    pub nature: AccountNature,
    pub opening_balance: Decimal,
    pub closing_balance: Decimal,
    pub entries: Vec<StatementEntry>,
}

/// Build the statement for `code` over an already-scoped voucher slice.
///
/// A voucher touching the account through several lines appears once, with
/// its sides summed. The running balance moves by the account's own sign
/// convention, starting from `opening_balance`.
pub fn account_statement(
    vouchers: &[Voucher],
    catalogue: &Catalogue,
    code: &str,
    opening_balance: Decimal,
) -> DomainResult<AccountStatement> {
    let account = catalogue
        .resolve(code)
        .ok_or_else(|| DomainError::unresolvable_account(code))?;

    let mut running = opening_balance;
    let mut entries = Vec::new();

    for voucher in vouchers {
        let mut debit = Decimal::ZERO;
        let mut credit = Decimal::ZERO;
        for line in voucher.lines.iter().filter(|l| l.account_code == code) {
            debit += line.debit;
            credit += line.credit;
        }
        if debit.is_zero() && credit.is_zero() {
            continue;
        }

        running += if account.nature.increases_on_debit() {
            debit - credit
        } else {
            credit - debit
        };
        entries.push(StatementEntry {
            voucher_id: voucher.id.clone(),
            date: voucher.date,
            narration: voucher.narration.clone(),
            debit,
            credit,
            running_balance: running,
        });
    }

    Ok(AccountStatement {
        code: code.to_string(),
        name: account.name.clone(),
        nature: account.nature,
        opening_balance,
        closing_balance: running,
        entries,
    })
}

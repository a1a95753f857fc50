//! Narration inference.
//!
//! When a voucher arrives without a narration, one is inferred from the shape
//! of its lines. The engine is an ordered table of pure rules over classified
//! lines; the first rule that matches wins, and a fallback guarantees a
//! narration always comes back. Precedence is load-bearing: specific phrasings
//! sit above generic ones, and the table order must not be shuffled.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use munim_accounts::{AccountNature, Catalogue};

use crate::voucher::Line;

/// Customer and vendor sub-ledger codes, supplied by the caller. The chart
/// of accounts alone cannot tell a receivable from any other current asset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyDirectory {
    pub customers: BTreeSet<String>,
    pub vendors: BTreeSet<String>,
}

impl PartyDirectory {
    pub fn with_customer(mut self, code: impl Into<String>) -> Self {
        self.customers.insert(code.into());
        self
    }

    pub fn with_vendor(mut self, code: impl Into<String>) -> Self {
        self.vendors.insert(code.into());
        self
    }
}

/// How a line participates in a transaction, for narration purposes only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineRole {
    Cash,
    Bank,
    Customer,
    Vendor,
    Revenue,
    ExpenseOrCogs,
    Other,
}

/// A line with its resolved role and display name.
struct ClassifiedLine {
    role: LineRole,
    name: String,
    debit: Decimal,
    credit: Decimal,
}

impl ClassifiedLine {
    /// Net direction; an ambiguous line counts on whichever side is larger.
    fn is_debited(&self) -> bool {
        self.debit > self.credit
    }

    fn is_credited(&self) -> bool {
        self.credit > self.debit
    }

    fn is_money(&self) -> bool {
        matches!(self.role, LineRole::Cash | LineRole::Bank)
    }

    /// "via Cash" reads better than "via Cash in Hand"; banks keep their name.
    fn via(&self) -> &str {
        match self.role {
            LineRole::Cash => "Cash",
            _ => &self.name,
        }
    }
}

fn classify(lines: &[Line], catalogue: &Catalogue, parties: &PartyDirectory) -> Vec<ClassifiedLine> {
    lines
        .iter()
        .map(|line| {
            let (role, name) = match catalogue.resolve(&line.account_code) {
                Some(account) => {
                    // Money roles come from the nature, party roles from the
                    // directory, everything else from the P&L family.
                    let role = match account.nature {
                        AccountNature::Cash => LineRole::Cash,
                        AccountNature::Bank => LineRole::Bank,
                        _ if parties.customers.contains(&line.account_code) => LineRole::Customer,
                        _ if parties.vendors.contains(&line.account_code) => LineRole::Vendor,
                        nature if nature.is_income() => LineRole::Revenue,
                        nature if nature.is_cost() => LineRole::ExpenseOrCogs,
                        _ => LineRole::Other,
                    };
                    (role, account.name.clone())
                }
                // Unknown code: still produce something deterministic.
                None => (LineRole::Other, line.account_code.clone()),
            };
            ClassifiedLine {
                role,
                name,
                debit: line.debit,
                credit: line.credit,
            }
        })
        .collect()
}

type Rule = fn(&[ClassifiedLine]) -> Option<String>;

/// First match wins.
const RULES: &[Rule] = &[
    received_payment,
    payment_made,
    purchase_from_vendor,
    sale_to_customer,
    expense_paid,
    bank_transfer,
    two_line_generic,
    multi_line_journal,
];

/// Infer a narration from the voucher's lines. Total: every input, including
/// unresolvable codes and empty line lists, produces some narration.
pub fn infer_narration(lines: &[Line], catalogue: &Catalogue, parties: &PartyDirectory) -> String {
    let classified = classify(lines, catalogue, parties);
    for rule in RULES {
        if let Some(narration) = rule(&classified) {
            return narration;
        }
    }
    fallback(&classified)
}

/// Money in: a cash/bank line debited against some non-money credit.
fn received_payment(lines: &[ClassifiedLine]) -> Option<String> {
    let money = lines.iter().find(|l| l.is_money() && l.is_debited())?;
    let counter = lines.iter().find(|l| !l.is_money() && l.is_credited())?;
    Some(format!(
        "Received payment from {} via {}",
        counter.name,
        money.via()
    ))
}

/// Money out: a cash/bank line credited against some non-money debit. The
/// phrasing follows the counterpart's role.
fn payment_made(lines: &[ClassifiedLine]) -> Option<String> {
    let money = lines.iter().find(|l| l.is_money() && l.is_credited())?;
    let counter = lines.iter().find(|l| !l.is_money() && l.is_debited())?;
    let narration = match counter.role {
        LineRole::ExpenseOrCogs => format!("Payment for {} via {}", counter.name, money.via()),
        LineRole::Vendor => format!("Paid to {} via {}", counter.name, money.via()),
        _ => format!("Payment to {} via {}", counter.name, money.via()),
    };
    Some(narration)
}

/// Credit purchase: goods or services in, vendor owed.
fn purchase_from_vendor(lines: &[ClassifiedLine]) -> Option<String> {
    let cost = lines
        .iter()
        .find(|l| l.role == LineRole::ExpenseOrCogs && l.is_debited());
    let vendor = lines
        .iter()
        .find(|l| l.role == LineRole::Vendor && l.is_credited());
    match (cost, vendor) {
        (Some(_), Some(vendor)) => Some(format!("Purchase from {}", vendor.name)),
        _ => None,
    }
}

/// Credit sale: customer owes, revenue recognized.
fn sale_to_customer(lines: &[ClassifiedLine]) -> Option<String> {
    let customer = lines
        .iter()
        .find(|l| l.role == LineRole::Customer && l.is_debited());
    let revenue = lines
        .iter()
        .find(|l| l.role == LineRole::Revenue && l.is_credited());
    match (customer, revenue) {
        (Some(customer), Some(_)) => Some(format!("Sale to {}", customer.name)),
        _ => None,
    }
}

/// Expense settled in money. Sits below `payment_made`, which already covers
/// this shape; the rung stays so the ladder keeps one rule per documented
/// transaction pattern.
fn expense_paid(lines: &[ClassifiedLine]) -> Option<String> {
    let expense = lines
        .iter()
        .find(|l| l.role == LineRole::ExpenseOrCogs && l.is_debited());
    let money = lines.iter().find(|l| l.is_money() && l.is_credited());
    match (expense, money) {
        (Some(expense), Some(money)) => {
            Some(format!("Payment for {} via {}", expense.name, money.via()))
        }
        _ => None,
    }
}

/// Bank-to-bank movement. Funds flow from the credited bank to the debited
/// one.
fn bank_transfer(lines: &[ClassifiedLine]) -> Option<String> {
    let to = lines
        .iter()
        .find(|l| l.role == LineRole::Bank && l.is_debited());
    let from = lines
        .iter()
        .find(|l| l.role == LineRole::Bank && l.is_credited());
    match (from, to) {
        (Some(from), Some(to)) => Some(format!("Transfer from {} to {}", from.name, to.name)),
        _ => None,
    }
}

/// Exactly two lines carry a net amount. Zero-amount rider lines on legacy
/// vouchers do not demote the voucher to the journal-entry phrasing.
fn two_line_generic(lines: &[ClassifiedLine]) -> Option<String> {
    let moving: Vec<&ClassifiedLine> = lines
        .iter()
        .filter(|l| l.is_debited() || l.is_credited())
        .collect();
    if moving.len() != 2 {
        return None;
    }
    let debited = moving.iter().find(|l| l.is_debited())?;
    let credited = moving.iter().find(|l| l.is_credited())?;
    Some(format!("{} to {}", debited.name, credited.name))
}

fn multi_line_journal(lines: &[ClassifiedLine]) -> Option<String> {
    if lines.len() < 3 {
        return None;
    }
    let debited = lines.iter().find(|l| l.is_debited())?;
    let credited = lines.iter().find(|l| l.is_credited())?;
    Some(format!("Journal Entry: {} to {}", debited.name, credited.name))
}

/// Last rung: name the accounts involved, in order of appearance.
fn fallback(lines: &[ClassifiedLine]) -> String {
    let mut names: Vec<&str> = Vec::new();
    for line in lines {
        if !names.contains(&line.name.as_str()) {
            names.push(&line.name);
        }
    }
    if names.is_empty() {
        "Journal Entry".to_string()
    } else {
        format!("Journal Entry - {}", names.join(", "))
    }
}

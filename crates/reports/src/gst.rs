//! GST summary in the GSTR-1 / GSTR-3B shape.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use munim_accounts::{Catalogue, GstAccountSet};
use munim_journal::{Voucher, VoucherKind};

use crate::balances::{AccountBalances, ReportWarnings};

/// One side of the summary: outward supplies (sales) or inward supplies
/// (purchases). Reversals come from credit/debit notes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GstSection {
    pub taxable_value: Decimal,
    pub taxable_reversed: Decimal,
    pub tax_charged: Decimal,
    pub tax_reversed: Decimal,
    /// `tax_charged - tax_reversed`.
    pub net_tax: Decimal,
    pub voucher_count: usize,
}

/// Period GST position derived from kind-classified vouchers.
///
/// Tax lines are identified by account membership in the [`GstAccountSet`];
/// the *direction* of each movement comes from the voucher kind, because the
/// same payable account is credited by an invoice and debited by the credit
/// note reversing it.
///
/// `net_payable` from the document walk is cross-checked against the same
/// figure recomputed from the tax sub-ledger balances. The two diverge when
/// GST accounts were touched by vouchers outside the four document kinds
/// (for example a tax payment posted as a plain journal), or when documents
/// were misclassified; divergence is reported, not fatal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GstSummary {
    pub outward: GstSection,
    pub inward: GstSection,
    /// Outward net tax minus inward net credit.
    pub net_payable: Decimal,
    /// The same figure recomputed from the tax account balances.
    pub ledger_net_payable: Decimal,
    pub reconciles: bool,
    pub warnings: ReportWarnings,
}

fn taxable_outward(voucher: &Voucher, gst: &GstAccountSet) -> Decimal {
    // Value lines on an invoice are the non-tax lines that ended up credited.
    voucher
        .lines
        .iter()
        .filter(|l| !gst.is_tax_account(&l.account_code) && l.credit > l.debit)
        .map(|l| l.credit - l.debit)
        .sum()
}

fn taxable_inward(voucher: &Voucher, gst: &GstAccountSet) -> Decimal {
    voucher
        .lines
        .iter()
        .filter(|l| !gst.is_tax_account(&l.account_code) && l.debit > l.credit)
        .map(|l| l.debit - l.credit)
        .sum()
}

fn tax_on(voucher: &Voucher, is_tax: impl Fn(&str) -> bool, credit_side: bool) -> Decimal {
    voucher
        .lines
        .iter()
        .filter(|l| is_tax(&l.account_code))
        .map(|l| {
            if credit_side {
                l.credit - l.debit
            } else {
                l.debit - l.credit
            }
        })
        .sum()
}

/// Derive the GST summary.
///
/// `vouchers` must be the same scoped slice the `balances` fold consumed;
/// the reconciliation check is meaningless across mismatched scopes.
pub fn gst_summary(
    vouchers: &[Voucher],
    balances: &AccountBalances,
    catalogue: &Catalogue,
    gst: &GstAccountSet,
) -> GstSummary {
    let mut outward = GstSection::default();
    let mut inward = GstSection::default();

    for voucher in vouchers {
        match voucher.kind {
            VoucherKind::Invoice => {
                outward.voucher_count += 1;
                outward.taxable_value += taxable_outward(voucher, gst);
                outward.tax_charged += tax_on(voucher, |c| gst.is_output(c), true);
            }
            VoucherKind::CreditNote => {
                outward.voucher_count += 1;
                // The reversal mirrors the invoice: value lines debited,
                // output tax debited back.
                outward.taxable_reversed += taxable_inward(voucher, gst);
                outward.tax_reversed += tax_on(voucher, |c| gst.is_output(c), false);
            }
            VoucherKind::Bill => {
                inward.voucher_count += 1;
                inward.taxable_value += taxable_inward(voucher, gst);
                inward.tax_charged += tax_on(voucher, |c| gst.is_input(c), false);
            }
            VoucherKind::DebitNote => {
                inward.voucher_count += 1;
                inward.taxable_reversed += taxable_outward(voucher, gst);
                inward.tax_reversed += tax_on(voucher, |c| gst.is_input(c), true);
            }
            VoucherKind::Other => {}
        }
    }

    outward.net_tax = outward.tax_charged - outward.tax_reversed;
    inward.net_tax = inward.tax_charged - inward.tax_reversed;
    let net_payable = outward.net_tax - inward.net_tax;

    // Same figure from the sub-ledger: output accounts are credit-natured,
    // input accounts debit-natured, so their signed balances are already the
    // net charge and the net credit.
    let ledger_output: Decimal = gst.output.iter().map(|c| balances.balance(c)).sum();
    let ledger_input: Decimal = gst.input.iter().map(|c| balances.balance(c)).sum();
    let ledger_net_payable = ledger_output - ledger_input;

    let reconciles = net_payable == ledger_net_payable;
    if !reconciles {
        warn!(
            %net_payable,
            %ledger_net_payable,
            "GST summary does not reconcile with the tax sub-ledger"
        );
    }

    // The catalogue is only needed to keep tax accounts natured correctly;
    // a GST code resolving to a debit-increasing nature would silently flip
    // the ledger-side figure.
    for code in gst.output.iter().chain(gst.input.iter()) {
        if let Some(account) = catalogue.resolve(code) {
            let output_side = gst.is_output(code);
            if output_side == account.nature.increases_on_debit() {
                warn!(%code, nature = ?account.nature, "GST account natured against its side");
            }
        }
    }

    GstSummary {
        outward,
        inward,
        net_payable,
        ledger_net_payable,
        reconciles,
        warnings: balances.warnings.clone(),
    }
}

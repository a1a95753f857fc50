//! Read-side derivations over the voucher log.
//!
//! Nothing in this crate is stored. Each request scans the tenant's vouchers,
//! folds them into signed per-account balances, and derives the requested
//! view from that one fold, so trial balance, P&L, GST and tax figures can
//! never drift apart. Data-quality findings ride along as [`ReportWarnings`]
//! instead of failing the request; historical vouchers cannot be fixed
//! retroactively in an append-only log.

pub mod advance_tax;
pub mod balances;
pub mod engine;
pub mod gst;
pub mod profit_loss;
pub mod statement;
pub mod trial_balance;

pub use advance_tax::{
    AdvanceTaxProjection, EntityType, Installment, TaxCredits, TaxSlab, advance_tax, slab_tax,
};
pub use balances::{AccountBalances, ReportWarnings, aggregate, aggregate_from};
pub use engine::{ReportEngine, ReportError};
pub use gst::{GstSection, GstSummary, gst_summary};
pub use profit_loss::{PnlRow, PnlSection, ProfitAndLoss, profit_and_loss};
pub use statement::{AccountStatement, StatementEntry, account_statement};
pub use trial_balance::{TrialBalance, TrialBalanceRow, trial_balance};

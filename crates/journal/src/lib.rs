//! `munim-journal` — vouchers and the posting rules.
//!
//! A voucher is one atomic journal entry: a dated, narrated set of debit and
//! credit lines that must balance exactly. The log is append-only; posted
//! vouchers are never edited, and corrections are new offsetting vouchers
//! (a credit note reversing an invoice, a debit note reversing a bill).

pub mod narration;
pub mod voucher;

pub use narration::{PartyDirectory, infer_narration};
pub use voucher::{
    Line, LineWarning, Voucher, VoucherDraft, VoucherId, VoucherKind, parse_voucher_date,
};

//! Voucher types and posting validation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use munim_accounts::Catalogue;
use munim_core::{DomainError, DomainResult, TenantId};

use crate::narration::{PartyDirectory, infer_narration};

/// Externally visible voucher id, e.g. `INV-0042`. Producers allocate these;
/// the log only requires uniqueness per tenant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoucherId(String);

impl VoucherId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for VoucherId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Transaction kind, fixed at posting time.
///
/// The kind used to be encoded in the document-id prefix (`INV-`, `CN-`,
/// `BILL-`, `DN-`); it is now an explicit field so reports never re-parse
/// ids. [`VoucherKind::from_document_id`] remains as the adapter for ids
/// minted under the old convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoucherKind {
    /// Outward supply (sale).
    Invoice,
    /// Reversal of an invoice: sales return or post-sale adjustment.
    CreditNote,
    /// Inward supply (purchase).
    Bill,
    /// Reversal of a bill: purchase return.
    DebitNote,
    /// Anything else: payments, receipts, manual journals.
    Other,
}

impl VoucherKind {
    /// Classify a historical document id by its prefix.
    ///
    /// The prefix convention was a soft contract for producers, never a
    /// schema constraint, so anything unrecognized is [`VoucherKind::Other`].
    pub fn from_document_id(id: &str) -> Self {
        let upper = id.to_ascii_uppercase();
        if upper.starts_with("INV-") {
            Self::Invoice
        } else if upper.starts_with("CN-") {
            Self::CreditNote
        } else if upper.starts_with("BILL-") {
            Self::Bill
        } else if upper.starts_with("DN-") {
            Self::DebitNote
        } else {
            Self::Other
        }
    }
}

/// One debit/credit leg of a voucher. Lines belong exclusively to their
/// voucher; they are never shared or referenced across vouchers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub account_code: String,
    pub debit: Decimal,
    pub credit: Decimal,
}

impl Line {
    pub fn debit(account_code: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_code: account_code.into(),
            debit: amount,
            credit: Decimal::ZERO,
        }
    }

    pub fn credit(account_code: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_code: account_code.into(),
            debit: Decimal::ZERO,
            credit: amount,
        }
    }

    /// A well-formed line moves exactly one side. Both sides set, or both
    /// zero, is tolerated historical data, not an error.
    pub fn is_ambiguous(&self) -> bool {
        let debit_set = !self.debit.is_zero();
        let credit_set = !self.credit.is_zero();
        debit_set == credit_set
    }
}

/// Soft data-quality finding raised at posting time. Warnings never reject
/// a voucher; the hard failures are [`DomainError`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineWarning {
    /// Both sides set, or both zero. Aggregation nets such lines.
    Ambiguous { line_index: usize, account_code: String },
}

/// One posted journal entry. Immutable once it enters the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voucher {
    pub id: VoucherId,
    pub kind: VoucherKind,
    pub tenant_id: TenantId,
    pub date: NaiveDate,
    pub narration: String,
    pub lines: Vec<Line>,
    /// Originating party's account code, when the document has one.
    pub party: Option<String>,
}

impl Voucher {
    pub fn debit_total(&self) -> Decimal {
        self.lines.iter().map(|l| l.debit).sum()
    }

    pub fn credit_total(&self) -> Decimal {
        self.lines.iter().map(|l| l.credit).sum()
    }

    pub fn is_balanced(&self) -> bool {
        self.debit_total() == self.credit_total()
    }
}

/// Authoring-time input for a voucher, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherDraft {
    pub id: VoucherId,
    /// `None` derives the kind from the id prefix (old-convention ids).
    pub kind: Option<VoucherKind>,
    pub tenant_id: TenantId,
    pub date: NaiveDate,
    /// `None` or blank asks for an inferred narration.
    pub narration: Option<String>,
    pub lines: Vec<Line>,
    pub party: Option<String>,
}

impl VoucherDraft {
    /// Validate the draft and produce the immutable voucher that enters the
    /// log, plus any soft findings.
    ///
    /// The whole voucher is rejected on any hard failure; there is no
    /// partial accept of a subset of lines.
    pub fn post(
        self,
        catalogue: &Catalogue,
        parties: &PartyDirectory,
    ) -> DomainResult<(Voucher, Vec<LineWarning>)> {
        if self.lines.is_empty() {
            return Err(DomainError::validation("voucher must have lines"));
        }

        let mut warnings = Vec::new();
        for (line_index, line) in self.lines.iter().enumerate() {
            if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO {
                return Err(DomainError::validation(format!(
                    "line {line_index}: amounts must not be negative"
                )));
            }
            if catalogue.resolve(&line.account_code).is_none() {
                return Err(DomainError::unresolvable_account(line.account_code.clone()));
            }
            if line.is_ambiguous() {
                warnings.push(LineWarning::Ambiguous {
                    line_index,
                    account_code: line.account_code.clone(),
                });
            }
        }

        let debit_total: Decimal = self.lines.iter().map(|l| l.debit).sum();
        let credit_total: Decimal = self.lines.iter().map(|l| l.credit).sum();
        // Exact decimal comparison; there is no tolerance window.
        if debit_total != credit_total {
            return Err(DomainError::invariant(format!(
                "debits must equal credits (debit {debit_total}, credit {credit_total})"
            )));
        }

        let kind = self
            .kind
            .unwrap_or_else(|| VoucherKind::from_document_id(self.id.as_str()));

        let narration = match self.narration {
            Some(text) if !text.trim().is_empty() => text,
            _ => infer_narration(&self.lines, catalogue, parties),
        };

        Ok((
            Voucher {
                id: self.id,
                kind,
                tenant_id: self.tenant_id,
                date: self.date,
                narration,
                lines: self.lines,
                party: self.party,
            },
            warnings,
        ))
    }
}

/// Parse a producer-supplied voucher date (`YYYY-MM-DD`).
pub fn parse_voucher_date(s: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| DomainError::invalid_date(format!("{s}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use munim_accounts::{Account, AccountNature, system_catalogue};
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn test_tenant_id() -> TenantId {
        TenantId::new()
    }

    fn test_catalogue() -> Catalogue {
        let tenant = vec![
            Account::new("1211", "Acme & Co", AccountNature::CurrentAsset),
            Account::new("2111", "Bharat Suppliers", AccountNature::CurrentLiability),
        ];
        Catalogue::merge(&system_catalogue(), &tenant)
    }

    fn test_parties() -> PartyDirectory {
        PartyDirectory::default()
            .with_customer("1211")
            .with_vendor("2111")
    }

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 14).unwrap()
    }

    fn draft(id: &str, lines: Vec<Line>) -> VoucherDraft {
        VoucherDraft {
            id: VoucherId::new(id),
            kind: None,
            tenant_id: test_tenant_id(),
            date: test_date(),
            narration: Some("Test voucher".to_string()),
            lines,
            party: None,
        }
    }

    #[test]
    fn balanced_voucher_posts_without_warnings() {
        let lines = vec![
            Line::debit("1001", dec!(500.00)),
            Line::credit("4001", dec!(500.00)),
        ];

        let (voucher, warnings) = draft("JV-1", lines)
            .post(&test_catalogue(), &test_parties())
            .unwrap();

        assert!(warnings.is_empty());
        assert!(voucher.is_balanced());
        assert_eq!(voucher.narration, "Test voucher");
    }

    #[test]
    fn unbalanced_voucher_is_rejected() {
        let lines = vec![
            Line::debit("1001", dec!(500.00)),
            Line::credit("4001", dec!(400.00)),
        ];

        let err = draft("JV-2", lines)
            .post(&test_catalogue(), &test_parties())
            .unwrap_err();

        match err {
            DomainError::InvariantViolation(msg) if msg.contains("debits must equal credits") => {}
            other => panic!("expected invariant violation, got {other:?}"),
        }
    }

    #[test]
    fn empty_voucher_is_rejected() {
        let err = draft("JV-3", vec![])
            .post(&test_catalogue(), &test_parties())
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn negative_amount_is_rejected() {
        let lines = vec![
            Line::debit("1001", dec!(-10.00)),
            Line::credit("4001", dec!(-10.00)),
        ];
        let err = draft("JV-4", lines)
            .post(&test_catalogue(), &test_parties())
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn unknown_account_code_rejects_the_whole_voucher() {
        let lines = vec![
            Line::debit("9999", dec!(100.00)),
            Line::credit("4001", dec!(100.00)),
        ];
        let err = draft("JV-5", lines)
            .post(&test_catalogue(), &test_parties())
            .unwrap_err();
        match err {
            DomainError::UnresolvableAccount(code) => assert_eq!(code, "9999"),
            other => panic!("expected unresolvable account, got {other:?}"),
        }
    }

    #[test]
    fn ambiguous_line_posts_with_a_warning() {
        let lines = vec![
            Line {
                account_code: "1001".to_string(),
                debit: dec!(100.00),
                credit: dec!(40.00),
            },
            Line::credit("4001", dec!(60.00)),
        ];

        let (_, warnings) = draft("JV-6", lines)
            .post(&test_catalogue(), &test_parties())
            .unwrap();

        assert_eq!(
            warnings,
            vec![LineWarning::Ambiguous {
                line_index: 0,
                account_code: "1001".to_string(),
            }]
        );
    }

    #[test]
    fn zero_zero_line_is_ambiguous_too() {
        let lines = vec![
            Line {
                account_code: "1001".to_string(),
                debit: Decimal::ZERO,
                credit: Decimal::ZERO,
            },
            Line::debit("1001", dec!(75.00)),
            Line::credit("4001", dec!(75.00)),
        ];

        let (_, warnings) = draft("JV-7", lines)
            .post(&test_catalogue(), &test_parties())
            .unwrap();

        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn kind_derives_from_id_prefix_when_absent() {
        for (id, expected) in [
            ("INV-001", VoucherKind::Invoice),
            ("inv-002", VoucherKind::Invoice),
            ("CN-001", VoucherKind::CreditNote),
            ("BILL-001", VoucherKind::Bill),
            ("DN-001", VoucherKind::DebitNote),
            ("JV-001", VoucherKind::Other),
            ("INVOICE1", VoucherKind::Other),
        ] {
            assert_eq!(VoucherKind::from_document_id(id), expected, "{id}");
        }
    }

    #[test]
    fn explicit_kind_wins_over_the_id_prefix() {
        let lines = vec![
            Line::debit("1001", dec!(10.00)),
            Line::credit("4001", dec!(10.00)),
        ];
        let mut d = draft("INV-9", lines);
        d.kind = Some(VoucherKind::Other);

        let (voucher, _) = d.post(&test_catalogue(), &test_parties()).unwrap();
        assert_eq!(voucher.kind, VoucherKind::Other);
    }

    #[test]
    fn blank_narration_is_replaced_by_an_inferred_one() {
        let lines = vec![
            Line::debit("1101", dec!(500.00)),
            Line::credit("1211", dec!(500.00)),
        ];
        let mut d = draft("RCPT-1", lines);
        d.narration = Some("   ".to_string());

        let (voucher, _) = d.post(&test_catalogue(), &test_parties()).unwrap();
        assert_eq!(
            voucher.narration,
            "Received payment from Acme & Co via Bank Account"
        );
    }

    #[test]
    fn parse_voucher_date_accepts_iso_and_rejects_the_rest() {
        assert_eq!(
            parse_voucher_date("2025-07-14").unwrap(),
            NaiveDate::from_ymd_opt(2025, 7, 14).unwrap()
        );
        assert!(matches!(
            parse_voucher_date("14/07/2025"),
            Err(DomainError::InvalidDate(_))
        ));
        assert!(matches!(
            parse_voucher_date("2025-02-30"),
            Err(DomainError::InvalidDate(_))
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: any draft built from matching debit/credit pairs posts,
        /// and the posted voucher balances exactly.
        #[test]
        fn balanced_drafts_always_post(
            paise in prop::collection::vec(1i64..100_000_000i64, 1..8)
        ) {
            let catalogue = test_catalogue();
            let parties = test_parties();

            let mut lines = Vec::new();
            for p in &paise {
                let amount = Decimal::new(*p, 2);
                lines.push(Line::debit("1001", amount));
                lines.push(Line::credit("4001", amount));
            }

            let (voucher, _) = draft("JV-P", lines).post(&catalogue, &parties).unwrap();
            prop_assert!(voucher.is_balanced());
            prop_assert_eq!(voucher.debit_total(), voucher.credit_total());
        }

        /// Property: skewing one side by any non-zero amount is always
        /// rejected as an invariant violation.
        #[test]
        fn unbalanced_drafts_never_post(
            paise in 1i64..100_000_000i64,
            skew in 1i64..10_000i64
        ) {
            let lines = vec![
                Line::debit("1001", Decimal::new(paise, 2)),
                Line::credit("4001", Decimal::new(paise + skew, 2)),
            ];

            let err = draft("JV-Q", lines)
                .post(&test_catalogue(), &test_parties())
                .unwrap_err();
            prop_assert!(matches!(err, DomainError::InvariantViolation(_)));
        }
    }
}

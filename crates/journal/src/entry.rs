use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use bookforge_core::{AccountId, AggregateId, EntryId, LedgerError, LedgerResult, TenantId, UserId};

/// Journal entry lifecycle. Posted is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Draft,
    Posted,
}

/// Weak link from a journal entry to the business document that produced it.
///
/// Lookup only, no ownership. Manual entries carry no reference.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum Reference {
    Invoice(AggregateId),
    CustomerPayment(AggregateId),
    GoodsReceipt(AggregateId),
    SupplierPayment(AggregateId),
    PayrollRun(AggregateId),
    Expense(AggregateId),
}

impl Reference {
    pub fn kind(&self) -> &'static str {
        match self {
            Reference::Invoice(_) => "invoice",
            Reference::CustomerPayment(_) => "customer_payment",
            Reference::GoodsReceipt(_) => "goods_receipt",
            Reference::SupplierPayment(_) => "supplier_payment",
            Reference::PayrollRun(_) => "payroll_run",
            Reference::Expense(_) => "expense",
        }
    }

    pub fn document_id(&self) -> AggregateId {
        match self {
            Reference::Invoice(id)
            | Reference::CustomerPayment(id)
            | Reference::GoodsReceipt(id)
            | Reference::SupplierPayment(id)
            | Reference::PayrollRun(id)
            | Reference::Expense(id) => *id,
        }
    }
}

/// One side of a journal entry.
///
/// Amounts are non-negative integers in the smallest currency subunit.
/// Invariant: a line carries a debit or a credit, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntryLine {
    pub account_id: AccountId,
    pub debit: i64,
    pub credit: i64,
    pub description: Option<String>,
}

impl JournalEntryLine {
    pub fn debit(account_id: AccountId, amount: i64) -> Self {
        Self {
            account_id,
            debit: amount,
            credit: 0,
            description: None,
        }
    }

    pub fn credit(account_id: AccountId, amount: i64) -> Self {
        Self {
            account_id,
            debit: 0,
            credit: amount,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn validate(&self) -> LedgerResult<()> {
        if self.debit < 0 || self.credit < 0 {
            return Err(LedgerError::validation("line amounts must be non-negative"));
        }
        if self.debit > 0 && self.credit > 0 {
            return Err(LedgerError::validation(
                "line must not carry both a debit and a credit",
            ));
        }
        if self.debit == 0 && self.credit == 0 {
            return Err(LedgerError::validation(
                "line must carry a debit or a credit amount",
            ));
        }
        Ok(())
    }
}

/// Validate a whole line set for entry creation. Balance is NOT checked here;
/// balance is a posting-time concern so entries can be assembled in stages.
pub fn validate_lines(lines: &[JournalEntryLine]) -> LedgerResult<()> {
    if lines.is_empty() {
        return Err(LedgerError::validation("journal entry must have lines"));
    }
    for line in lines {
        line.validate()?;
    }
    Ok(())
}

/// Caller-supplied header fields for a new entry.
///
/// `entry_date` defaults from the clock when omitted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntryMeta {
    pub entry_date: Option<NaiveDate>,
    pub reference: Option<Reference>,
    pub description: String,
    pub is_system: bool,
}

impl EntryMeta {
    pub fn manual(description: impl Into<String>) -> Self {
        Self {
            entry_date: None,
            reference: None,
            description: description.into(),
            is_system: false,
        }
    }

    pub fn system(description: impl Into<String>, reference: Reference) -> Self {
        Self {
            entry_date: None,
            reference: Some(reference),
            description: description.into(),
            is_system: true,
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.entry_date = Some(date);
        self
    }
}

/// Fully-resolved payload handed to the store. Header + lines persist as one
/// atomic unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewJournalEntry {
    pub entry_date: NaiveDate,
    pub reference: Option<Reference>,
    pub description: String,
    pub is_system: bool,
    pub lines: Vec<JournalEntryLine>,
}

/// A journal entry with its lines attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: EntryId,
    pub tenant_id: TenantId,
    pub entry_date: NaiveDate,
    pub reference: Option<Reference>,
    pub description: String,
    pub is_system: bool,
    pub status: EntryStatus,
    pub posted_by: Option<UserId>,
    pub lines: Vec<JournalEntryLine>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JournalEntry {
    /// Sum of (debits, credits) over the lines, widened to avoid overflow.
    pub fn totals(&self) -> (i128, i128) {
        let mut debits: i128 = 0;
        let mut credits: i128 = 0;
        for line in &self.lines {
            debits += line.debit as i128;
            credits += line.credit as i128;
        }
        (debits, credits)
    }

    /// The posting gate: debits must equal credits.
    pub fn check_balanced(&self) -> LedgerResult<()> {
        let (debits, credits) = self.totals();
        if debits != credits {
            return Err(LedgerError::unbalanced(debits, credits));
        }
        Ok(())
    }

    pub fn is_posted(&self) -> bool {
        self.status == EntryStatus::Posted
    }
}

/// Read-only projection of a posted entry.
///
/// The only way to obtain one is `TryFrom<JournalEntry>`, which rejects
/// anything not Posted; the inner entry is never exposed mutably. Together
/// with the absence of any line-mutation API this makes posted entries
/// immutable structurally rather than by convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostedEntry(JournalEntry);

impl TryFrom<JournalEntry> for PostedEntry {
    type Error = LedgerError;

    fn try_from(entry: JournalEntry) -> Result<Self, Self::Error> {
        if entry.status != EntryStatus::Posted {
            return Err(LedgerError::validation(
                "entry is not posted; drafts have no read-only projection",
            ));
        }
        Ok(Self(entry))
    }
}

impl PostedEntry {
    pub fn id(&self) -> EntryId {
        self.0.id
    }

    pub fn tenant_id(&self) -> TenantId {
        self.0.tenant_id
    }

    pub fn entry_date(&self) -> NaiveDate {
        self.0.entry_date
    }

    pub fn reference(&self) -> Option<Reference> {
        self.0.reference
    }

    pub fn description(&self) -> &str {
        &self.0.description
    }

    pub fn is_system(&self) -> bool {
        self.0.is_system
    }

    pub fn posted_by(&self) -> Option<UserId> {
        self.0.posted_by
    }

    pub fn lines(&self) -> &[JournalEntryLine] {
        &self.0.lines
    }

    pub fn totals(&self) -> (i128, i128) {
        self.0.totals()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_account_id() -> AccountId {
        AccountId::new()
    }

    fn test_entry(lines: Vec<JournalEntryLine>) -> JournalEntry {
        JournalEntry {
            id: EntryId::new(),
            tenant_id: TenantId::new(),
            entry_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            reference: None,
            description: "Test entry".to_string(),
            is_system: false,
            status: EntryStatus::Draft,
            posted_by: None,
            lines,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn line_with_both_sides_is_rejected() {
        let line = JournalEntryLine {
            account_id: test_account_id(),
            debit: 100,
            credit: 100,
            description: None,
        };
        let err = line.validate().unwrap_err();
        match err {
            LedgerError::Validation(msg) if msg.contains("both a debit and a credit") => {}
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn empty_line_and_negative_amounts_are_rejected() {
        let zero = JournalEntryLine {
            account_id: test_account_id(),
            debit: 0,
            credit: 0,
            description: None,
        };
        assert!(zero.validate().is_err());

        let negative = JournalEntryLine {
            account_id: test_account_id(),
            debit: -1,
            credit: 0,
            description: None,
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn balanced_entry_passes_the_gate() {
        let account = test_account_id();
        let entry = test_entry(vec![
            JournalEntryLine::debit(account, 11_000),
            JournalEntryLine::credit(test_account_id(), 10_000),
            JournalEntryLine::credit(test_account_id(), 1_000),
        ]);
        assert_eq!(entry.totals(), (11_000, 11_000));
        entry.check_balanced().unwrap();
    }

    #[test]
    fn unbalanced_entry_reports_both_sums() {
        let entry = test_entry(vec![
            JournalEntryLine::debit(test_account_id(), 100),
            JournalEntryLine::credit(test_account_id(), 90),
        ]);
        let err = entry.check_balanced().unwrap_err();
        match err {
            LedgerError::Unbalanced { debits, credits } => {
                assert_eq!(debits, 100);
                assert_eq!(credits, 90);
            }
            other => panic!("expected unbalanced error, got {other:?}"),
        }
    }

    #[test]
    fn posted_projection_rejects_drafts() {
        let draft = test_entry(vec![JournalEntryLine::debit(test_account_id(), 1)]);
        assert!(PostedEntry::try_from(draft.clone()).is_err());

        let mut posted = draft;
        posted.status = EntryStatus::Posted;
        posted.posted_by = Some(UserId::new());
        let projection = PostedEntry::try_from(posted).unwrap();
        assert_eq!(projection.lines().len(), 1);
    }

    #[test]
    fn reference_serializes_as_tagged_union() {
        let id = AggregateId::new();
        let value = serde_json::to_value(Reference::Invoice(id)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "kind": "invoice", "id": id.as_uuid() })
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the posting gate accepts a line set exactly when the
        /// debit and credit sums agree.
        #[test]
        fn gate_accepts_iff_sums_agree(
            amounts in prop::collection::vec((1i64..1_000_000i64, prop::bool::ANY), 1..12)
        ) {
            let lines: Vec<JournalEntryLine> = amounts
                .iter()
                .map(|(amount, is_debit)| {
                    if *is_debit {
                        JournalEntryLine::debit(test_account_id(), *amount)
                    } else {
                        JournalEntryLine::credit(test_account_id(), *amount)
                    }
                })
                .collect();
            let entry = test_entry(lines);
            let (debits, credits) = entry.totals();

            match entry.check_balanced() {
                Ok(()) => prop_assert_eq!(debits, credits),
                Err(LedgerError::Unbalanced { debits: d, credits: c }) => {
                    prop_assert_ne!(d, c);
                    prop_assert_eq!(d, debits);
                    prop_assert_eq!(c, credits);
                }
                Err(other) => prop_assert!(false, "unexpected error {:?}", other),
            }
        }
    }
}

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use bookforge_core::{AccountId, EntryId, LedgerResult, TenantId, UserId};

use crate::entry::{JournalEntry, NewJournalEntry};

/// Inclusive `entry_date` filter. `None` bounds are open.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn all_time() -> Self {
        Self::default()
    }

    pub fn up_to(to: Option<NaiveDate>) -> Self {
        Self { from: None, to }
    }

    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        if let Some(from) = self.from {
            if date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if date > to {
                return false;
            }
        }
        true
    }
}

/// Posted debit/credit sums for one account, widened to i128.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccountMovement {
    pub debit: i128,
    pub credit: i128,
}

/// Tenant-isolated journal storage.
///
/// Implementations must:
/// - enforce tenant isolation on every operation
/// - persist an entry's header and lines as one atomic unit; an unknown
///   `account_id` on any line rejects the whole insert with `NotFound`
/// - treat `mark_posted` as a compare-and-set on Draft status inside a single
///   critical section, re-verifying balance as the final gate (`Conflict`
///   when already posted, `Unbalanced` when sums differ)
/// - expose no way to mutate or delete lines after insert
/// - compute `account_movement` over **Posted** entries only, so drafts can
///   never influence balances or reports
pub trait JournalStore: Send + Sync {
    /// Insert a Draft entry with all its lines atomically.
    fn insert_entry(&self, tenant_id: TenantId, entry: NewJournalEntry)
    -> LedgerResult<JournalEntry>;

    /// Fetch one entry with lines attached. `NotFound` if unknown.
    fn entry(&self, tenant_id: TenantId, id: EntryId) -> LedgerResult<JournalEntry>;

    /// All entries for a tenant, in insertion order.
    fn entries(&self, tenant_id: TenantId) -> LedgerResult<Vec<JournalEntry>>;

    /// One-way Draft → Posted transition.
    fn mark_posted(
        &self,
        tenant_id: TenantId,
        id: EntryId,
        posted_by: UserId,
        posted_at: DateTime<Utc>,
    ) -> LedgerResult<JournalEntry>;

    /// Sum posted debits/credits for an account over an `entry_date` range.
    fn account_movement(
        &self,
        tenant_id: TenantId,
        account_id: AccountId,
        range: &DateRange,
    ) -> LedgerResult<AccountMovement>;
}

impl<S> JournalStore for Arc<S>
where
    S: JournalStore + ?Sized,
{
    fn insert_entry(
        &self,
        tenant_id: TenantId,
        entry: NewJournalEntry,
    ) -> LedgerResult<JournalEntry> {
        (**self).insert_entry(tenant_id, entry)
    }

    fn entry(&self, tenant_id: TenantId, id: EntryId) -> LedgerResult<JournalEntry> {
        (**self).entry(tenant_id, id)
    }

    fn entries(&self, tenant_id: TenantId) -> LedgerResult<Vec<JournalEntry>> {
        (**self).entries(tenant_id)
    }

    fn mark_posted(
        &self,
        tenant_id: TenantId,
        id: EntryId,
        posted_by: UserId,
        posted_at: DateTime<Utc>,
    ) -> LedgerResult<JournalEntry> {
        (**self).mark_posted(tenant_id, id, posted_by, posted_at)
    }

    fn account_movement(
        &self,
        tenant_id: TenantId,
        account_id: AccountId,
        range: &DateRange,
    ) -> LedgerResult<AccountMovement> {
        (**self).account_movement(tenant_id, account_id, range)
    }
}

use chrono::Utc;

use bookforge_accounts::AccountStore;
use bookforge_core::{EntryId, LedgerError, LedgerResult, TenantId, UserId};

use crate::entry::{
    validate_lines, EntryMeta, EntryStatus, JournalEntry, JournalEntryLine, NewJournalEntry,
    PostedEntry,
};
use crate::store::JournalStore;

/// Journal entry builder and posting engine.
///
/// Creation and posting are separate so entries can be assembled in stages;
/// only posting validates balance. Generators use [`create_and_post`] to run
/// both as one logical unit.
///
/// [`create_and_post`]: JournalService::create_and_post
#[derive(Debug, Clone)]
pub struct JournalService<S> {
    store: S,
}

impl<S> JournalService<S>
where
    S: AccountStore + JournalStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create a Draft entry with all lines as one atomic unit.
    ///
    /// An unknown `account_id` on any line aborts the whole operation with
    /// `NotFound`. Balance is not checked here.
    pub fn create_entry(
        &self,
        tenant_id: TenantId,
        meta: EntryMeta,
        lines: Vec<JournalEntryLine>,
    ) -> LedgerResult<JournalEntry> {
        validate_lines(&lines)?;

        // Accounts are never deleted, so existence checked here still holds
        // at insert time.
        for line in &lines {
            self.store.account(tenant_id, line.account_id).map_err(|e| match e {
                LedgerError::NotFound(_) => LedgerError::not_found(format!(
                    "account {} referenced by entry line",
                    line.account_id
                )),
                other => other,
            })?;
        }

        let entry_date = meta
            .entry_date
            .unwrap_or_else(|| Utc::now().date_naive());

        let entry = self.store.insert_entry(
            tenant_id,
            NewJournalEntry {
                entry_date,
                reference: meta.reference,
                description: meta.description,
                is_system: meta.is_system,
                lines,
            },
        )?;

        tracing::debug!(
            "created draft entry {} ({} lines) for tenant {}",
            entry.id,
            entry.lines.len(),
            tenant_id
        );
        Ok(entry)
    }

    /// Post a Draft entry: the one-way transition that makes it authoritative.
    ///
    /// Recomputes the debit/credit sums; on mismatch fails with `Unbalanced`
    /// and leaves the entry untouched (still Draft). Posting an already
    /// posted entry is a `Conflict`.
    pub fn post_entry(
        &self,
        tenant_id: TenantId,
        entry_id: EntryId,
        actor: UserId,
    ) -> LedgerResult<PostedEntry> {
        let entry = self.store.entry(tenant_id, entry_id)?;

        if entry.status == EntryStatus::Posted {
            return Err(LedgerError::conflict(format!(
                "entry {entry_id} is already posted"
            )));
        }

        entry.check_balanced()?;

        // Lines are immutable after insert, so the balance verified above
        // still holds inside the store's critical section; the store
        // re-checks regardless as the final gate.
        let posted = self
            .store
            .mark_posted(tenant_id, entry_id, actor, Utc::now())?;

        let (debits, _) = posted.totals();
        tracing::info!(
            "posted entry {} for tenant {} (total {})",
            entry_id,
            tenant_id,
            debits
        );

        PostedEntry::try_from(posted)
    }

    /// Create and immediately post, as one logical unit.
    ///
    /// Used by the auto-journal generators so a momentarily-unbalanced draft
    /// is never observable through reports (drafts are excluded from balance
    /// computation anyway; this keeps the event-to-entry pipeline atomic from
    /// the caller's point of view).
    pub fn create_and_post(
        &self,
        tenant_id: TenantId,
        meta: EntryMeta,
        lines: Vec<JournalEntryLine>,
        actor: UserId,
    ) -> LedgerResult<PostedEntry> {
        let entry = self.create_entry(tenant_id, meta, lines)?;
        self.post_entry(tenant_id, entry.id, actor)
    }
}

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use bookforge_accounts::{Account, AccountStore, NewAccount};
use bookforge_core::{AccountId, EntryId, LedgerError, LedgerResult, TenantId, UserId};
use bookforge_journal::{
    validate_lines, AccountMovement, DateRange, EntryStatus, JournalEntry, JournalStore,
    NewJournalEntry,
};

/// Per-tenant ledger state: chart of accounts plus the append-only journal.
#[derive(Debug, Default)]
struct TenantLedger {
    accounts: HashMap<AccountId, Account>,
    codes: HashMap<String, AccountId>,
    entries: Vec<JournalEntry>,
    entry_index: HashMap<EntryId, usize>,
}

/// In-memory ledger store.
///
/// Intended for tests/dev. Not optimized for performance.
///
/// All state sits behind a single `RwLock`, so every trait call executes as
/// one all-or-nothing unit: no reader can observe an entry header without its
/// lines, or a Posted status on an unbalanced entry. A poisoned lock maps to
/// `Concurrency`, which callers may retry.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    tenants: RwLock<HashMap<TenantId, TenantLedger>>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> LedgerResult<std::sync::RwLockReadGuard<'_, HashMap<TenantId, TenantLedger>>> {
        self.tenants
            .read()
            .map_err(|_| LedgerError::concurrency("ledger store lock poisoned"))
    }

    fn write(
        &self,
    ) -> LedgerResult<std::sync::RwLockWriteGuard<'_, HashMap<TenantId, TenantLedger>>> {
        self.tenants
            .write()
            .map_err(|_| LedgerError::concurrency("ledger store lock poisoned"))
    }
}

impl AccountStore for InMemoryLedgerStore {
    fn insert_account(&self, tenant_id: TenantId, account: NewAccount) -> LedgerResult<Account> {
        let mut tenants = self.write()?;
        let ledger = tenants.entry(tenant_id).or_default();

        if ledger.codes.contains_key(&account.code) {
            return Err(LedgerError::conflict(format!(
                "account code {} already exists",
                account.code
            )));
        }

        let now = Utc::now();
        let stored = Account {
            id: AccountId::new(),
            tenant_id,
            code: account.code,
            name: account.name,
            account_type: account.account_type,
            subtype: account.subtype,
            opening_balance: account.opening_balance,
            is_system: account.is_system,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        ledger.codes.insert(stored.code.clone(), stored.id);
        ledger.accounts.insert(stored.id, stored.clone());
        Ok(stored)
    }

    fn account(&self, tenant_id: TenantId, id: AccountId) -> LedgerResult<Account> {
        let tenants = self.read()?;
        tenants
            .get(&tenant_id)
            .and_then(|ledger| ledger.accounts.get(&id))
            .cloned()
            .ok_or_else(|| LedgerError::not_found(format!("account {id}")))
    }

    fn accounts(&self, tenant_id: TenantId) -> LedgerResult<Vec<Account>> {
        let tenants = self.read()?;
        Ok(tenants
            .get(&tenant_id)
            .map(|ledger| ledger.accounts.values().cloned().collect())
            .unwrap_or_default())
    }

    fn rename_account(
        &self,
        tenant_id: TenantId,
        id: AccountId,
        name: String,
    ) -> LedgerResult<Account> {
        let mut tenants = self.write()?;
        let account = tenants
            .get_mut(&tenant_id)
            .and_then(|ledger| ledger.accounts.get_mut(&id))
            .ok_or_else(|| LedgerError::not_found(format!("account {id}")))?;
        account.name = name;
        account.updated_at = Utc::now();
        Ok(account.clone())
    }

    fn set_account_active(
        &self,
        tenant_id: TenantId,
        id: AccountId,
        is_active: bool,
    ) -> LedgerResult<Account> {
        let mut tenants = self.write()?;
        let account = tenants
            .get_mut(&tenant_id)
            .and_then(|ledger| ledger.accounts.get_mut(&id))
            .ok_or_else(|| LedgerError::not_found(format!("account {id}")))?;
        account.is_active = is_active;
        account.updated_at = Utc::now();
        Ok(account.clone())
    }
}

impl JournalStore for InMemoryLedgerStore {
    fn insert_entry(
        &self,
        tenant_id: TenantId,
        entry: NewJournalEntry,
    ) -> LedgerResult<JournalEntry> {
        let mut tenants = self.write()?;
        let ledger = tenants.entry(tenant_id).or_default();

        validate_lines(&entry.lines)?;

        // Referential check inside the critical section: an unknown account
        // on any line aborts the whole insert, nothing is written.
        for line in &entry.lines {
            if !ledger.accounts.contains_key(&line.account_id) {
                return Err(LedgerError::not_found(format!(
                    "account {} referenced by entry line",
                    line.account_id
                )));
            }
        }

        let now = Utc::now();
        let stored = JournalEntry {
            id: EntryId::new(),
            tenant_id,
            entry_date: entry.entry_date,
            reference: entry.reference,
            description: entry.description,
            is_system: entry.is_system,
            status: EntryStatus::Draft,
            posted_by: None,
            lines: entry.lines,
            created_at: now,
            updated_at: now,
        };
        ledger.entry_index.insert(stored.id, ledger.entries.len());
        ledger.entries.push(stored.clone());
        Ok(stored)
    }

    fn entry(&self, tenant_id: TenantId, id: EntryId) -> LedgerResult<JournalEntry> {
        let tenants = self.read()?;
        tenants
            .get(&tenant_id)
            .and_then(|ledger| {
                ledger
                    .entry_index
                    .get(&id)
                    .and_then(|&idx| ledger.entries.get(idx))
            })
            .cloned()
            .ok_or_else(|| LedgerError::not_found(format!("journal entry {id}")))
    }

    fn entries(&self, tenant_id: TenantId) -> LedgerResult<Vec<JournalEntry>> {
        let tenants = self.read()?;
        Ok(tenants
            .get(&tenant_id)
            .map(|ledger| ledger.entries.clone())
            .unwrap_or_default())
    }

    fn mark_posted(
        &self,
        tenant_id: TenantId,
        id: EntryId,
        posted_by: UserId,
        posted_at: DateTime<Utc>,
    ) -> LedgerResult<JournalEntry> {
        let mut tenants = self.write()?;
        let entry = tenants
            .get_mut(&tenant_id)
            .and_then(|ledger| {
                let idx = *ledger.entry_index.get(&id)?;
                ledger.entries.get_mut(idx)
            })
            .ok_or_else(|| LedgerError::not_found(format!("journal entry {id}")))?;

        // Compare-and-set on Draft: Posted is terminal.
        if entry.status == EntryStatus::Posted {
            return Err(LedgerError::conflict(format!(
                "entry {id} is already posted"
            )));
        }

        // Final balance gate inside the critical section.
        entry.check_balanced()?;

        entry.status = EntryStatus::Posted;
        entry.posted_by = Some(posted_by);
        entry.updated_at = posted_at;
        Ok(entry.clone())
    }

    fn account_movement(
        &self,
        tenant_id: TenantId,
        account_id: AccountId,
        range: &DateRange,
    ) -> LedgerResult<AccountMovement> {
        let tenants = self.read()?;
        let mut movement = AccountMovement::default();

        let Some(ledger) = tenants.get(&tenant_id) else {
            return Ok(movement);
        };

        // Drafts never contribute to balances.
        for entry in &ledger.entries {
            if entry.status != EntryStatus::Posted || !range.contains(entry.entry_date) {
                continue;
            }
            for line in &entry.lines {
                if line.account_id != account_id {
                    continue;
                }
                movement.debit += line.debit as i128;
                movement.credit += line.credit as i128;
            }
        }

        Ok(movement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookforge_accounts::{AccountSubtype, AccountType};
    use bookforge_journal::JournalEntryLine;
    use chrono::NaiveDate;

    fn test_tenant_id() -> TenantId {
        TenantId::new()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn cash_account() -> NewAccount {
        NewAccount::new("1000", "Cash", AccountType::Asset, AccountSubtype::Cash)
    }

    fn capital_account() -> NewAccount {
        NewAccount::new(
            "3000",
            "Owner's Capital",
            AccountType::Equity,
            AccountSubtype::Capital,
        )
    }

    fn new_entry(lines: Vec<JournalEntryLine>) -> NewJournalEntry {
        NewJournalEntry {
            entry_date: date(2025, 4, 1),
            reference: None,
            description: "Test entry".to_string(),
            is_system: false,
            lines,
        }
    }

    #[test]
    fn duplicate_account_code_is_a_conflict() {
        let store = InMemoryLedgerStore::new();
        let tenant_id = test_tenant_id();

        store.insert_account(tenant_id, cash_account()).unwrap();
        let err = store.insert_account(tenant_id, cash_account()).unwrap_err();
        match err {
            LedgerError::Conflict(msg) if msg.contains("1000") => {}
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[test]
    fn same_code_is_allowed_across_tenants() {
        let store = InMemoryLedgerStore::new();
        store.insert_account(test_tenant_id(), cash_account()).unwrap();
        store.insert_account(test_tenant_id(), cash_account()).unwrap();
    }

    #[test]
    fn unknown_account_aborts_the_whole_insert() {
        let store = InMemoryLedgerStore::new();
        let tenant_id = test_tenant_id();
        let cash = store.insert_account(tenant_id, cash_account()).unwrap();

        let err = store
            .insert_entry(
                tenant_id,
                new_entry(vec![
                    JournalEntryLine::debit(cash.id, 100),
                    JournalEntryLine::credit(AccountId::new(), 100),
                ]),
            )
            .unwrap_err();
        match err {
            LedgerError::NotFound(msg) if msg.contains("entry line") => {}
            other => panic!("expected not found, got {other:?}"),
        }

        // All-or-nothing: the header must not have been written either.
        assert!(store.entries(tenant_id).unwrap().is_empty());
    }

    #[test]
    fn mark_posted_is_one_way() {
        let store = InMemoryLedgerStore::new();
        let tenant_id = test_tenant_id();
        let cash = store.insert_account(tenant_id, cash_account()).unwrap();
        let capital = store.insert_account(tenant_id, capital_account()).unwrap();

        let entry = store
            .insert_entry(
                tenant_id,
                new_entry(vec![
                    JournalEntryLine::debit(cash.id, 500),
                    JournalEntryLine::credit(capital.id, 500),
                ]),
            )
            .unwrap();

        let posted = store
            .mark_posted(tenant_id, entry.id, UserId::new(), Utc::now())
            .unwrap();
        assert_eq!(posted.status, EntryStatus::Posted);
        assert!(posted.posted_by.is_some());

        let err = store
            .mark_posted(tenant_id, entry.id, UserId::new(), Utc::now())
            .unwrap_err();
        match err {
            LedgerError::Conflict(msg) if msg.contains("already posted") => {}
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[test]
    fn store_rejects_unbalanced_posting_as_final_gate() {
        let store = InMemoryLedgerStore::new();
        let tenant_id = test_tenant_id();
        let cash = store.insert_account(tenant_id, cash_account()).unwrap();
        let capital = store.insert_account(tenant_id, capital_account()).unwrap();

        let entry = store
            .insert_entry(
                tenant_id,
                new_entry(vec![
                    JournalEntryLine::debit(cash.id, 100),
                    JournalEntryLine::credit(capital.id, 90),
                ]),
            )
            .unwrap();

        let err = store
            .mark_posted(tenant_id, entry.id, UserId::new(), Utc::now())
            .unwrap_err();
        match err {
            LedgerError::Unbalanced { debits, credits } => {
                assert_eq!((debits, credits), (100, 90));
            }
            other => panic!("expected unbalanced, got {other:?}"),
        }
        assert_eq!(
            store.entry(tenant_id, entry.id).unwrap().status,
            EntryStatus::Draft
        );
    }

    #[test]
    fn drafts_are_invisible_to_movement() {
        let store = InMemoryLedgerStore::new();
        let tenant_id = test_tenant_id();
        let cash = store.insert_account(tenant_id, cash_account()).unwrap();
        let capital = store.insert_account(tenant_id, capital_account()).unwrap();

        let entry = store
            .insert_entry(
                tenant_id,
                new_entry(vec![
                    JournalEntryLine::debit(cash.id, 500),
                    JournalEntryLine::credit(capital.id, 500),
                ]),
            )
            .unwrap();

        let movement = store
            .account_movement(tenant_id, cash.id, &DateRange::all_time())
            .unwrap();
        assert_eq!(movement, AccountMovement::default());

        store
            .mark_posted(tenant_id, entry.id, UserId::new(), Utc::now())
            .unwrap();
        let movement = store
            .account_movement(tenant_id, cash.id, &DateRange::all_time())
            .unwrap();
        assert_eq!(movement.debit, 500);
        assert_eq!(movement.credit, 0);
    }

    #[test]
    fn movement_filters_by_entry_date() {
        let store = InMemoryLedgerStore::new();
        let tenant_id = test_tenant_id();
        let cash = store.insert_account(tenant_id, cash_account()).unwrap();
        let capital = store.insert_account(tenant_id, capital_account()).unwrap();

        for (day, amount) in [(1, 100), (15, 200), (28, 400)] {
            let mut entry = new_entry(vec![
                JournalEntryLine::debit(cash.id, amount),
                JournalEntryLine::credit(capital.id, amount),
            ]);
            entry.entry_date = date(2025, 4, day);
            let entry = store.insert_entry(tenant_id, entry).unwrap();
            store
                .mark_posted(tenant_id, entry.id, UserId::new(), Utc::now())
                .unwrap();
        }

        let mid_month = store
            .account_movement(
                tenant_id,
                cash.id,
                &DateRange::between(date(2025, 4, 10), date(2025, 4, 20)),
            )
            .unwrap();
        assert_eq!(mid_month.debit, 200);

        let up_to_mid = store
            .account_movement(tenant_id, cash.id, &DateRange::up_to(Some(date(2025, 4, 15))))
            .unwrap();
        assert_eq!(up_to_mid.debit, 300);
    }

    #[test]
    fn tenants_are_isolated() {
        let store = InMemoryLedgerStore::new();
        let tenant_a = test_tenant_id();
        let tenant_b = test_tenant_id();

        let cash = store.insert_account(tenant_a, cash_account()).unwrap();
        let err = store.account(tenant_b, cash.id).unwrap_err();
        match err {
            LedgerError::NotFound(_) => {}
            other => panic!("expected not found, got {other:?}"),
        }
    }
}

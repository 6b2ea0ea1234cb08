use bookforge_core::{AccountId, LedgerError, LedgerResult, TenantId};

use crate::account::{Account, AccountSubtype, NewAccount};
use crate::store::AccountStore;

/// Chart-of-accounts lookups, including system-account resolution.
#[derive(Debug, Clone)]
pub struct AccountRegistry<S> {
    store: S,
}

impl<S> AccountRegistry<S>
where
    S: AccountStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create a single account (company setup).
    pub fn create_account(
        &self,
        tenant_id: TenantId,
        account: NewAccount,
    ) -> LedgerResult<Account> {
        if account.code.trim().is_empty() {
            return Err(LedgerError::validation("account code must not be empty"));
        }
        if account.name.trim().is_empty() {
            return Err(LedgerError::validation("account name must not be empty"));
        }

        let created = self.store.insert_account(tenant_id, account)?;
        tracing::debug!(
            "created account {} ({}) for tenant {}",
            created.code,
            created.name,
            tenant_id
        );
        Ok(created)
    }

    /// Seed a whole chart at once. Fails on the first bad account.
    pub fn seed_chart(
        &self,
        tenant_id: TenantId,
        accounts: Vec<NewAccount>,
    ) -> LedgerResult<Vec<Account>> {
        let mut created = Vec::with_capacity(accounts.len());
        for account in accounts {
            created.push(self.create_account(tenant_id, account)?);
        }
        tracing::info!("seeded {} accounts for tenant {}", created.len(), tenant_id);
        Ok(created)
    }

    pub fn account(&self, tenant_id: TenantId, id: AccountId) -> LedgerResult<Account> {
        self.store.account(tenant_id, id)
    }

    /// Full chart for a tenant, sorted by code.
    pub fn chart_of_accounts(&self, tenant_id: TenantId) -> LedgerResult<Vec<Account>> {
        let mut accounts = self.store.accounts(tenant_id)?;
        accounts.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(accounts)
    }

    pub fn rename_account(
        &self,
        tenant_id: TenantId,
        id: AccountId,
        name: impl Into<String>,
    ) -> LedgerResult<Account> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(LedgerError::validation("account name must not be empty"));
        }
        self.store.rename_account(tenant_id, id, name)
    }

    pub fn set_account_active(
        &self,
        tenant_id: TenantId,
        id: AccountId,
        is_active: bool,
    ) -> LedgerResult<Account> {
        self.store.set_account_active(tenant_id, id, is_active)
    }

    /// Resolve the unique active system account of `subtype`, optionally
    /// narrowed by `code`.
    ///
    /// Zero matches and multiple matches are both configuration failures:
    /// resolution must be deterministic, never first-result-wins.
    pub fn find_system_account(
        &self,
        tenant_id: TenantId,
        subtype: AccountSubtype,
        code: Option<&str>,
    ) -> LedgerResult<Account> {
        let mut matches: Vec<Account> = self
            .store
            .accounts(tenant_id)?
            .into_iter()
            .filter(|a| {
                a.is_system
                    && a.is_active
                    && a.subtype == subtype
                    && code.is_none_or(|c| a.code == c)
            })
            .collect();

        match matches.len() {
            0 => Err(LedgerError::configuration(format!(
                "no active system account with subtype {subtype:?} configured"
            ))),
            1 => Ok(matches.remove(0)),
            n => Err(LedgerError::configuration(format!(
                "ambiguous system account: {n} active accounts share subtype {subtype:?}; \
                 disambiguate by code"
            ))),
        }
    }
}

use std::sync::Arc;

use bookforge_core::{AccountId, LedgerResult, TenantId};

use crate::account::{Account, NewAccount};

/// Tenant-isolated chart-of-accounts storage.
///
/// Implementations must:
/// - enforce tenant isolation on every operation
/// - reject duplicate account codes within a tenant (`Conflict`)
/// - assign identifiers and timestamps on insert
///
/// Deliberately, no delete operation exists: accounts referenced by posted
/// lines must survive forever, so removal is not expressible at all. The only
/// mutations are name and activity edits.
pub trait AccountStore: Send + Sync {
    /// Insert a new account and return the stored record.
    fn insert_account(&self, tenant_id: TenantId, account: NewAccount) -> LedgerResult<Account>;

    /// Fetch one account. `NotFound` if the id is unknown in this tenant.
    fn account(&self, tenant_id: TenantId, id: AccountId) -> LedgerResult<Account>;

    /// All accounts for a tenant, in no particular order.
    fn accounts(&self, tenant_id: TenantId) -> LedgerResult<Vec<Account>>;

    /// Rename an account.
    fn rename_account(
        &self,
        tenant_id: TenantId,
        id: AccountId,
        name: String,
    ) -> LedgerResult<Account>;

    /// Activate or deactivate an account.
    fn set_account_active(
        &self,
        tenant_id: TenantId,
        id: AccountId,
        is_active: bool,
    ) -> LedgerResult<Account>;
}

impl<S> AccountStore for Arc<S>
where
    S: AccountStore + ?Sized,
{
    fn insert_account(&self, tenant_id: TenantId, account: NewAccount) -> LedgerResult<Account> {
        (**self).insert_account(tenant_id, account)
    }

    fn account(&self, tenant_id: TenantId, id: AccountId) -> LedgerResult<Account> {
        (**self).account(tenant_id, id)
    }

    fn accounts(&self, tenant_id: TenantId) -> LedgerResult<Vec<Account>> {
        (**self).accounts(tenant_id)
    }

    fn rename_account(
        &self,
        tenant_id: TenantId,
        id: AccountId,
        name: String,
    ) -> LedgerResult<Account> {
        (**self).rename_account(tenant_id, id, name)
    }

    fn set_account_active(
        &self,
        tenant_id: TenantId,
        id: AccountId,
        is_active: bool,
    ) -> LedgerResult<Account> {
        (**self).set_account_active(tenant_id, id, is_active)
    }
}

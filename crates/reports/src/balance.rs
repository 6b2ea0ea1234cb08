use chrono::NaiveDate;

use bookforge_accounts::{Account, AccountStore, BalanceSide};
use bookforge_core::{AccountId, LedgerResult, TenantId};
use bookforge_journal::{AccountMovement, DateRange, JournalStore};

/// Point-in-time and period balances with the per-type sign convention.
///
/// Only Posted lines ever contribute; the store guarantees drafts are
/// invisible to movement queries.
#[derive(Debug, Clone)]
pub struct BalanceCalculator<S> {
    store: S,
}

fn signed_net(account: &Account, movement: AccountMovement) -> i128 {
    match account.normal_balance_side() {
        BalanceSide::Debit => movement.debit - movement.credit,
        BalanceSide::Credit => movement.credit - movement.debit,
    }
}

impl<S> BalanceCalculator<S>
where
    S: AccountStore + JournalStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Balance as of a date (all-time when `None`): opening balance plus the
    /// lifetime signed net movement up to and including `as_of`.
    pub fn balance(
        &self,
        tenant_id: TenantId,
        account_id: AccountId,
        as_of: Option<NaiveDate>,
    ) -> LedgerResult<i128> {
        let account = self.store.account(tenant_id, account_id)?;
        self.balance_of(tenant_id, &account, as_of)
    }

    /// Signed movement within `[from, to]`, excluding the opening balance.
    /// A pure period delta.
    pub fn balance_for_period(
        &self,
        tenant_id: TenantId,
        account_id: AccountId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> LedgerResult<i128> {
        let account = self.store.account(tenant_id, account_id)?;
        self.period_movement_of(tenant_id, &account, from, to)
    }

    /// Same as [`balance`], for callers that already hold the account record.
    ///
    /// [`balance`]: BalanceCalculator::balance
    pub fn balance_of(
        &self,
        tenant_id: TenantId,
        account: &Account,
        as_of: Option<NaiveDate>,
    ) -> LedgerResult<i128> {
        let movement =
            self.store
                .account_movement(tenant_id, account.id, &DateRange::up_to(as_of))?;
        Ok(account.opening_balance as i128 + signed_net(account, movement))
    }

    /// Same as [`balance_for_period`], for callers that already hold the
    /// account record.
    ///
    /// [`balance_for_period`]: BalanceCalculator::balance_for_period
    pub fn period_movement_of(
        &self,
        tenant_id: TenantId,
        account: &Account,
        from: NaiveDate,
        to: NaiveDate,
    ) -> LedgerResult<i128> {
        let movement =
            self.store
                .account_movement(tenant_id, account.id, &DateRange::between(from, to))?;
        Ok(signed_net(account, movement))
    }
}

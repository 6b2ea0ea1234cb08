use chrono::NaiveDate;
use serde::Serialize;

use bookforge_accounts::{Account, AccountStore, AccountType, BalanceSide};
use bookforge_core::{AccountId, LedgerResult, TenantId};
use bookforge_journal::JournalStore;

use crate::balance::BalanceCalculator;

/// One trial balance line: the account's balance placed on a single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialBalanceRow {
    pub account_id: AccountId,
    pub code: String,
    pub name: String,
    pub debit: i128,
    pub credit: i128,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialBalance {
    pub as_of: Option<NaiveDate>,
    pub rows: Vec<TrialBalanceRow>,
    pub total_debit: i128,
    pub total_credit: i128,
}

/// One profit & loss line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfitAndLossRow {
    pub account_id: AccountId,
    pub code: String,
    pub name: String,
    pub amount: i128,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfitAndLoss {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub income: Vec<ProfitAndLossRow>,
    pub expenses: Vec<ProfitAndLossRow>,
    pub total_income: i128,
    pub total_expenses: i128,
    pub net_profit: i128,
}

/// One balance sheet line. The synthetic net-profit row carries no code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceSheetRow {
    pub code: Option<String>,
    pub name: String,
    pub amount: i128,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceSheet {
    pub as_of: NaiveDate,
    pub assets: Vec<BalanceSheetRow>,
    pub liabilities: Vec<BalanceSheetRow>,
    pub equity: Vec<BalanceSheetRow>,
    pub total_assets: i128,
    pub total_liabilities: i128,
    pub total_equity: i128,
    /// Diagnostic only: `assets == liabilities + equity`. A `false` value
    /// signals upstream data corruption; it is never enforced at runtime.
    pub balanced: bool,
}

/// Derives the three financial statements from account balances.
#[derive(Debug, Clone)]
pub struct ReportGenerator<S> {
    store: S,
    calculator: BalanceCalculator<S>,
}

impl<S> ReportGenerator<S>
where
    S: AccountStore + JournalStore + Clone,
{
    pub fn new(store: S) -> Self {
        Self {
            calculator: BalanceCalculator::new(store.clone()),
            store,
        }
    }

    fn sorted_accounts(&self, tenant_id: TenantId) -> LedgerResult<Vec<Account>> {
        let mut accounts = self.store.accounts(tenant_id)?;
        accounts.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(accounts)
    }

    /// Trial balance over all active accounts as of a date.
    ///
    /// Zero balances are skipped. A balance on its normal side lands in that
    /// column; an abnormal (negative) balance lands as `abs` on the opposite
    /// column.
    pub fn trial_balance(
        &self,
        tenant_id: TenantId,
        as_of: Option<NaiveDate>,
    ) -> LedgerResult<TrialBalance> {
        let mut rows = Vec::new();
        let mut total_debit: i128 = 0;
        let mut total_credit: i128 = 0;

        for account in self.sorted_accounts(tenant_id)? {
            if !account.is_active {
                continue;
            }
            let balance = self.calculator.balance_of(tenant_id, &account, as_of)?;
            if balance == 0 {
                continue;
            }

            let normal_side = account.normal_balance_side();
            let (debit, credit) = match (normal_side, balance >= 0) {
                (BalanceSide::Debit, true) => (balance, 0),
                (BalanceSide::Debit, false) => (0, balance.abs()),
                (BalanceSide::Credit, true) => (0, balance),
                (BalanceSide::Credit, false) => (balance.abs(), 0),
            };
            total_debit += debit;
            total_credit += credit;
            rows.push(TrialBalanceRow {
                account_id: account.id,
                code: account.code,
                name: account.name,
                debit,
                credit,
            });
        }

        tracing::debug!(
            "trial balance for tenant {}: {} rows, debit {} / credit {}",
            tenant_id,
            rows.len(),
            total_debit,
            total_credit
        );

        Ok(TrialBalance {
            as_of,
            rows,
            total_debit,
            total_credit,
        })
    }

    /// Profit & loss over a period: income and expense period deltas, no
    /// opening balances. Only non-zero accounts are listed.
    pub fn profit_and_loss(
        &self,
        tenant_id: TenantId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> LedgerResult<ProfitAndLoss> {
        let mut income = Vec::new();
        let mut expenses = Vec::new();
        let mut total_income: i128 = 0;
        let mut total_expenses: i128 = 0;

        for account in self.sorted_accounts(tenant_id)? {
            if account.account_type != AccountType::Income
                && account.account_type != AccountType::Expense
            {
                continue;
            }
            let amount = self
                .calculator
                .period_movement_of(tenant_id, &account, from, to)?;
            if amount == 0 {
                continue;
            }
            let row = ProfitAndLossRow {
                account_id: account.id,
                code: account.code,
                name: account.name,
                amount,
            };
            if account.account_type == AccountType::Income {
                total_income += amount;
                income.push(row);
            } else {
                total_expenses += amount;
                expenses.push(row);
            }
        }

        Ok(ProfitAndLoss {
            from,
            to,
            income,
            expenses,
            total_income,
            total_expenses,
            net_profit: total_income - total_expenses,
        })
    }

    /// Balance sheet as of a date.
    ///
    /// Current-year earnings have no account of their own; they appear as a
    /// synthetic equity row computed from the P&L between the fiscal year
    /// start and `as_of`.
    pub fn balance_sheet(
        &self,
        tenant_id: TenantId,
        as_of: NaiveDate,
        fiscal_year_start: NaiveDate,
    ) -> LedgerResult<BalanceSheet> {
        let mut assets = Vec::new();
        let mut liabilities = Vec::new();
        let mut equity = Vec::new();
        let mut total_assets: i128 = 0;
        let mut total_liabilities: i128 = 0;
        let mut total_equity: i128 = 0;

        for account in self.sorted_accounts(tenant_id)? {
            let (bucket, total) = match account.account_type {
                AccountType::Asset => (&mut assets, &mut total_assets),
                AccountType::Liability => (&mut liabilities, &mut total_liabilities),
                AccountType::Equity => (&mut equity, &mut total_equity),
                _ => continue,
            };
            let amount = self
                .calculator
                .balance_of(tenant_id, &account, Some(as_of))?;
            if amount == 0 {
                continue;
            }
            *total += amount;
            bucket.push(BalanceSheetRow {
                code: Some(account.code),
                name: account.name,
                amount,
            });
        }

        let net_profit = self
            .profit_and_loss(tenant_id, fiscal_year_start, as_of)?
            .net_profit;
        total_equity += net_profit;
        equity.push(BalanceSheetRow {
            code: None,
            name: "Net Profit (Current Year)".to_string(),
            amount: net_profit,
        });

        Ok(BalanceSheet {
            as_of,
            assets,
            liabilities,
            equity,
            total_assets,
            total_liabilities,
            total_equity,
            balanced: total_assets == total_liabilities + total_equity,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use bookforge_accounts::{AccountRegistry, AccountSubtype, NewAccount};
    use bookforge_core::{TenantId, UserId};
    use bookforge_journal::{EntryMeta, JournalEntryLine, JournalService};
    use bookforge_store::InMemoryLedgerStore;

    use super::*;

    type Store = Arc<InMemoryLedgerStore>;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup() -> (Store, TenantId, AccountRegistry<Store>, JournalService<Store>) {
        let store: Store = Arc::new(InMemoryLedgerStore::new());
        let tenant_id = TenantId::new();
        let registry = AccountRegistry::new(store.clone());
        let journal = JournalService::new(store.clone());
        (store, tenant_id, registry, journal)
    }

    fn cash_and_capital(
        tenant_id: TenantId,
        registry: &AccountRegistry<Store>,
    ) -> (Account, Account) {
        let cash = registry
            .create_account(
                tenant_id,
                NewAccount::new("1000", "Cash", AccountType::Asset, AccountSubtype::Cash),
            )
            .unwrap();
        let capital = registry
            .create_account(
                tenant_id,
                NewAccount::new(
                    "3000",
                    "Owner's Capital",
                    AccountType::Equity,
                    AccountSubtype::Capital,
                ),
            )
            .unwrap();
        (cash, capital)
    }

    fn post(
        journal: &JournalService<Store>,
        tenant_id: TenantId,
        lines: Vec<JournalEntryLine>,
    ) {
        journal
            .create_and_post(
                tenant_id,
                EntryMeta::manual("Test entry").on(date(2025, 4, 15)),
                lines,
                UserId::new(),
            )
            .unwrap();
    }

    #[test]
    fn abnormal_balances_land_on_the_opposite_column() {
        let (store, tenant_id, registry, journal) = setup();
        let (cash, capital) = cash_and_capital(tenant_id, &registry);

        // Drawing against empty accounts: both balances go abnormal.
        post(
            &journal,
            tenant_id,
            vec![
                JournalEntryLine::debit(capital.id, 500),
                JournalEntryLine::credit(cash.id, 500),
            ],
        );

        let tb = ReportGenerator::new(store)
            .trial_balance(tenant_id, None)
            .unwrap();

        let cash_row = tb.rows.iter().find(|r| r.code == "1000").unwrap();
        assert_eq!((cash_row.debit, cash_row.credit), (0, 500));
        let capital_row = tb.rows.iter().find(|r| r.code == "3000").unwrap();
        assert_eq!((capital_row.debit, capital_row.credit), (500, 0));
        assert_eq!(tb.total_debit, tb.total_credit);
    }

    #[test]
    fn zero_balances_are_skipped() {
        let (store, tenant_id, registry, journal) = setup();
        let (cash, capital) = cash_and_capital(tenant_id, &registry);

        post(
            &journal,
            tenant_id,
            vec![
                JournalEntryLine::debit(cash.id, 800),
                JournalEntryLine::credit(capital.id, 800),
            ],
        );
        // Reverse it; both accounts return to zero.
        post(
            &journal,
            tenant_id,
            vec![
                JournalEntryLine::debit(capital.id, 800),
                JournalEntryLine::credit(cash.id, 800),
            ],
        );

        let tb = ReportGenerator::new(store)
            .trial_balance(tenant_id, None)
            .unwrap();
        assert!(tb.rows.is_empty());
    }

    #[test]
    fn inactive_accounts_are_left_out_of_the_trial_balance() {
        let (store, tenant_id, registry, journal) = setup();
        let (cash, capital) = cash_and_capital(tenant_id, &registry);

        post(
            &journal,
            tenant_id,
            vec![
                JournalEntryLine::debit(cash.id, 300),
                JournalEntryLine::credit(capital.id, 300),
            ],
        );
        registry
            .set_account_active(tenant_id, capital.id, false)
            .unwrap();

        let tb = ReportGenerator::new(store)
            .trial_balance(tenant_id, None)
            .unwrap();
        assert!(tb.rows.iter().any(|r| r.code == "1000"));
        assert!(!tb.rows.iter().any(|r| r.code == "3000"));
    }

    #[test]
    fn as_of_cuts_off_later_entries() {
        let (store, tenant_id, registry, journal) = setup();
        let (cash, capital) = cash_and_capital(tenant_id, &registry);

        journal
            .create_and_post(
                tenant_id,
                EntryMeta::manual("April entry").on(date(2025, 4, 15)),
                vec![
                    JournalEntryLine::debit(cash.id, 100),
                    JournalEntryLine::credit(capital.id, 100),
                ],
                UserId::new(),
            )
            .unwrap();
        journal
            .create_and_post(
                tenant_id,
                EntryMeta::manual("May entry").on(date(2025, 5, 15)),
                vec![
                    JournalEntryLine::debit(cash.id, 900),
                    JournalEntryLine::credit(capital.id, 900),
                ],
                UserId::new(),
            )
            .unwrap();

        let tb = ReportGenerator::new(store)
            .trial_balance(tenant_id, Some(date(2025, 4, 30)))
            .unwrap();
        let cash_row = tb.rows.iter().find(|r| r.code == "1000").unwrap();
        assert_eq!(cash_row.debit, 100);
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bookforge_core::{AccountId, TenantId};

/// High-level account type (determines the normal balance side).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Asset,
    Liability,
    Equity,
    Income,
    Expense,
}

/// The side on which an account type's balance is conventionally non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceSide {
    Debit,
    Credit,
}

impl AccountType {
    /// Pure mapping from account type to normal balance side. No I/O.
    pub fn normal_balance_side(self) -> BalanceSide {
        match self {
            AccountType::Asset | AccountType::Expense => BalanceSide::Debit,
            AccountType::Liability | AccountType::Equity | AccountType::Income => {
                BalanceSide::Credit
            }
        }
    }
}

/// Fine-grained account tag. System accounts are resolved by subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountSubtype {
    Receivable,
    Payable,
    Bank,
    Cash,
    Inventory,
    Revenue,
    OperatingExpense,
    CurrentLiability,
    VatPayable,
    TdsPayable,
    TaxPayable,
    SalaryExpense,
    SalaryPayable,
    Capital,
}

/// Chart-of-accounts entry.
///
/// Tenant-scoped; `code` is unique within the tenant. Accounts are created at
/// company setup and afterwards mutated only through name/activity edits.
/// There is no delete operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub tenant_id: TenantId,
    pub code: String,
    pub name: String,
    pub account_type: AccountType,
    pub subtype: AccountSubtype,
    /// Signed amount in the smallest currency subunit, on the normal side.
    pub opening_balance: i64,
    /// Auto-journal generators target system accounts by subtype.
    pub is_system: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn normal_balance_side(&self) -> BalanceSide {
        self.account_type.normal_balance_side()
    }
}

/// Payload for creating an account (setup time).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAccount {
    pub code: String,
    pub name: String,
    pub account_type: AccountType,
    pub subtype: AccountSubtype,
    pub opening_balance: i64,
    pub is_system: bool,
}

impl NewAccount {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        account_type: AccountType,
        subtype: AccountSubtype,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            account_type,
            subtype,
            opening_balance: 0,
            is_system: false,
        }
    }

    pub fn system(mut self) -> Self {
        self.is_system = true;
        self
    }

    pub fn with_opening_balance(mut self, amount: i64) -> Self {
        self.opening_balance = amount;
        self
    }
}

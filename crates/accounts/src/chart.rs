//! Default chart of accounts seeded at company setup.

use crate::account::{AccountSubtype, AccountType, NewAccount};

/// Standard chart: one active system account per bucket the auto-journal
/// generators target, plus owner's capital.
pub fn default_chart() -> Vec<NewAccount> {
    use AccountSubtype::*;
    use AccountType::*;

    vec![
        NewAccount::new("1000", "Cash", Asset, Cash).system(),
        NewAccount::new("1100", "Accounts Receivable", Asset, Receivable).system(),
        NewAccount::new("1200", "Bank", Asset, Bank).system(),
        NewAccount::new("1300", "Inventory", Asset, Inventory).system(),
        NewAccount::new("2100", "Accounts Payable", Liability, Payable).system(),
        NewAccount::new("2200", "VAT Payable", Liability, VatPayable).system(),
        NewAccount::new("2300", "TDS Payable", Liability, TdsPayable).system(),
        NewAccount::new("2400", "Salary Payable", Liability, SalaryPayable).system(),
        NewAccount::new("2500", "Payroll Tax Payable", Liability, TaxPayable).system(),
        NewAccount::new("3000", "Owner's Capital", Equity, Capital),
        NewAccount::new("4000", "Sales Revenue", Income, Revenue).system(),
        NewAccount::new("5000", "Salary Expense", Expense, SalaryExpense).system(),
        NewAccount::new("5100", "Operating Expenses", Expense, OperatingExpense).system(),
    ]
}

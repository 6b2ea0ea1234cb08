//! Derived reporting: point-in-time and period balances, trial balance,
//! profit & loss, and balance sheet.

pub mod balance;
pub mod statements;

pub use balance::BalanceCalculator;
pub use statements::{
    BalanceSheet, BalanceSheetRow, ProfitAndLoss, ProfitAndLossRow, ReportGenerator, TrialBalance,
    TrialBalanceRow,
};

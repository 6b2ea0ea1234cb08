//! Account registry (chart of accounts, system-account resolution).
//!
//! Pure domain types plus the storage trait and registry service. No IO
//! beyond the injected store.

pub mod account;
pub mod chart;
pub mod registry;
pub mod store;

pub use account::{Account, AccountSubtype, AccountType, BalanceSide, NewAccount};
pub use chart::default_chart;
pub use registry::AccountRegistry;
pub use store::AccountStore;

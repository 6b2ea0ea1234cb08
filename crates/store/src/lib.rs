//! Storage layer for the bookkeeping engine.
//!
//! One store implements both the chart-of-accounts and journal traits so a
//! single shared handle backs every service.

pub mod in_memory;


pub use in_memory::InMemoryLedgerStore;

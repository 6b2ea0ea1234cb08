//! Journal entries: atomic creation, the balance-invariant posting gate, and
//! the read-only posted projection.

pub mod entry;
pub mod service;
pub mod store;

pub use entry::{
    validate_lines, EntryMeta, EntryStatus, JournalEntry, JournalEntryLine, NewJournalEntry,
    PostedEntry, Reference,
};
pub use service::JournalService;
pub use store::{AccountMovement, DateRange, JournalStore};

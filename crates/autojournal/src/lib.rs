//! Auto-journal generators: one per business event type.
//!
//! Each generator resolves system accounts, builds a balanced line set, and
//! creates + posts the entry as one logical unit.

pub mod events;
pub mod generator;

pub use events::{
    ExpenseRecorded, GoodsReceived, InvoiceIssued, PaymentReceived, PayrollRun, ReceiptItem,
    SupplierPaid,
};
pub use generator::AutoJournal;

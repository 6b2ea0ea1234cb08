//! Business events consumed by the auto-journal generators.
//!
//! All amounts arrive pre-computed in the smallest currency subunit; no tax
//! or price calculation happens here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use bookforge_core::{AccountId, AggregateId, LedgerError, LedgerResult};

/// A sales invoice was issued to a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceIssued {
    pub invoice_id: AggregateId,
    pub invoice_date: NaiveDate,
    pub total: i64,
    pub subtotal: i64,
    pub tax: i64,
}

impl InvoiceIssued {
    pub fn validate(&self) -> LedgerResult<()> {
        if self.subtotal <= 0 {
            return Err(LedgerError::validation("invoice subtotal must be positive"));
        }
        if self.tax < 0 {
            return Err(LedgerError::validation("invoice tax must be non-negative"));
        }
        let expected = self
            .subtotal
            .checked_add(self.tax)
            .ok_or_else(|| LedgerError::validation("invoice total overflow"))?;
        if self.total != expected {
            return Err(LedgerError::validation(
                "invoice total must equal subtotal plus tax",
            ));
        }
        Ok(())
    }
}

/// A customer paid against their receivable balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceived {
    pub payment_id: AggregateId,
    pub payment_date: NaiveDate,
    pub amount: i64,
}

impl PaymentReceived {
    pub fn validate(&self) -> LedgerResult<()> {
        if self.amount <= 0 {
            return Err(LedgerError::validation("payment amount must be positive"));
        }
        Ok(())
    }
}

/// One received purchase line: quantity at unit cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptItem {
    pub quantity: i64,
    pub unit_cost: i64,
}

/// Goods arrived against a purchase; inventory value increases, the supplier
/// is owed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoodsReceived {
    pub receipt_id: AggregateId,
    pub receipt_date: NaiveDate,
    pub items: Vec<ReceiptItem>,
}

impl GoodsReceived {
    pub fn validate(&self) -> LedgerResult<()> {
        if self.items.is_empty() {
            return Err(LedgerError::validation(
                "goods receipt must have at least one item",
            ));
        }
        for item in &self.items {
            if item.quantity <= 0 {
                return Err(LedgerError::validation(
                    "receipt item quantity must be positive",
                ));
            }
            if item.unit_cost <= 0 {
                return Err(LedgerError::validation(
                    "receipt item unit cost must be positive",
                ));
            }
        }
        self.total().map(|_| ())
    }

    /// Σ quantity · unit_cost, with overflow checked at every step.
    pub fn total(&self) -> LedgerResult<i64> {
        let mut total: i128 = 0;
        for item in &self.items {
            let line_total = (item.quantity as i128)
                .checked_mul(item.unit_cost as i128)
                .ok_or_else(|| LedgerError::validation("receipt line total overflow"))?;
            total = total
                .checked_add(line_total)
                .ok_or_else(|| LedgerError::validation("receipt total overflow"))?;
        }
        i64::try_from(total).map_err(|_| LedgerError::validation("receipt total overflow"))
    }
}

/// A supplier was paid, optionally with tax deducted at source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierPaid {
    pub payment_id: AggregateId,
    pub payment_date: NaiveDate,
    /// Gross amount settled against the payable.
    pub amount: i64,
    /// Tax deducted at source, withheld from the bank outflow.
    pub tds: i64,
}

impl SupplierPaid {
    pub fn validate(&self) -> LedgerResult<()> {
        if self.amount <= 0 {
            return Err(LedgerError::validation("payment amount must be positive"));
        }
        if self.tds < 0 {
            return Err(LedgerError::validation("tds must be non-negative"));
        }
        if self.tds >= self.amount {
            return Err(LedgerError::validation(
                "tds must be less than the payment amount",
            ));
        }
        Ok(())
    }
}

/// A payroll run was finalized. Gross-to-net computation happens upstream;
/// the ledger only records the pre-computed split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRun {
    pub run_id: AggregateId,
    pub run_date: NaiveDate,
    pub gross: i64,
    pub net: i64,
    pub tax: i64,
}

impl PayrollRun {
    pub fn validate(&self) -> LedgerResult<()> {
        if self.gross <= 0 {
            return Err(LedgerError::validation("payroll gross must be positive"));
        }
        if self.net <= 0 {
            return Err(LedgerError::validation("payroll net must be positive"));
        }
        if self.tax < 0 {
            return Err(LedgerError::validation("payroll tax must be non-negative"));
        }
        let deductions = self
            .net
            .checked_add(self.tax)
            .ok_or_else(|| LedgerError::validation("payroll amount overflow"))?;
        if deductions > self.gross {
            return Err(LedgerError::validation(
                "payroll net plus tax must not exceed gross",
            ));
        }
        Ok(())
    }

    /// Portion of gross that is neither take-home pay nor tax (e.g. other
    /// withholdings), credited to salary payable as its own line.
    pub fn remainder(&self) -> i64 {
        self.gross - self.net - self.tax
    }
}

/// An operating expense was recorded, optionally against explicit accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecorded {
    pub expense_id: AggregateId,
    pub expense_date: NaiveDate,
    pub total: i64,
    /// Expense account override; system operating-expense account if `None`.
    pub expense_account_id: Option<AccountId>,
    /// Payment account override; system cash account if `None`.
    pub payment_account_id: Option<AccountId>,
}

impl ExpenseRecorded {
    pub fn validate(&self) -> LedgerResult<()> {
        if self.total <= 0 {
            return Err(LedgerError::validation("expense total must be positive"));
        }
        Ok(())
    }
}

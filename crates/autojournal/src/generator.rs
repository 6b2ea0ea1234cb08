use bookforge_accounts::{Account, AccountRegistry, AccountStore, AccountSubtype};
use bookforge_core::{LedgerResult, TenantId, UserId};
use bookforge_journal::{
    EntryMeta, JournalEntryLine, JournalService, JournalStore, PostedEntry, Reference,
};

use crate::events::{
    ExpenseRecorded, GoodsReceived, InvoiceIssued, PaymentReceived, PayrollRun, SupplierPaid,
};

/// Turns business events into posted journal entries.
///
/// Every method resolves its system accounts, builds a line set that is
/// balanced by construction, and runs create + post as one logical unit. A
/// `Configuration` failure aborts the whole pipeline before anything is
/// written; the triggering event must surface that error to its caller.
#[derive(Debug, Clone)]
pub struct AutoJournal<S> {
    registry: AccountRegistry<S>,
    journal: JournalService<S>,
}

impl<S> AutoJournal<S>
where
    S: AccountStore + JournalStore + Clone,
{
    pub fn new(store: S) -> Self {
        Self {
            registry: AccountRegistry::new(store.clone()),
            journal: JournalService::new(store),
        }
    }

    fn system_account(
        &self,
        tenant_id: TenantId,
        subtype: AccountSubtype,
    ) -> LedgerResult<Account> {
        self.registry.find_system_account(tenant_id, subtype, None)
    }

    /// Dr Receivable(total); Cr Revenue(subtotal); Cr VAT Payable(tax) if any.
    pub fn post_invoice_issued(
        &self,
        tenant_id: TenantId,
        actor: UserId,
        event: &InvoiceIssued,
    ) -> LedgerResult<PostedEntry> {
        event.validate()?;

        let receivable = self.system_account(tenant_id, AccountSubtype::Receivable)?;
        let revenue = self.system_account(tenant_id, AccountSubtype::Revenue)?;

        let mut lines = vec![
            JournalEntryLine::debit(receivable.id, event.total),
            JournalEntryLine::credit(revenue.id, event.subtotal),
        ];
        if event.tax > 0 {
            let vat = self.system_account(tenant_id, AccountSubtype::VatPayable)?;
            lines.push(JournalEntryLine::credit(vat.id, event.tax));
        }

        let meta = EntryMeta::system(
            format!("Invoice {}", event.invoice_id),
            Reference::Invoice(event.invoice_id),
        )
        .on(event.invoice_date);

        let posted = self.journal.create_and_post(tenant_id, meta, lines, actor)?;
        tracing::info!(
            "auto-journaled invoice {} for tenant {} (total {})",
            event.invoice_id,
            tenant_id,
            event.total
        );
        Ok(posted)
    }

    /// Dr Bank(amount); Cr Receivable(amount).
    pub fn post_payment_received(
        &self,
        tenant_id: TenantId,
        actor: UserId,
        event: &PaymentReceived,
    ) -> LedgerResult<PostedEntry> {
        event.validate()?;

        let bank = self.system_account(tenant_id, AccountSubtype::Bank)?;
        let receivable = self.system_account(tenant_id, AccountSubtype::Receivable)?;

        let lines = vec![
            JournalEntryLine::debit(bank.id, event.amount),
            JournalEntryLine::credit(receivable.id, event.amount),
        ];

        let meta = EntryMeta::system(
            format!("Customer payment {}", event.payment_id),
            Reference::CustomerPayment(event.payment_id),
        )
        .on(event.payment_date);

        let posted = self.journal.create_and_post(tenant_id, meta, lines, actor)?;
        tracing::info!(
            "auto-journaled customer payment {} for tenant {} (amount {})",
            event.payment_id,
            tenant_id,
            event.amount
        );
        Ok(posted)
    }

    /// Dr Inventory(total); Cr Payable(total).
    pub fn post_goods_received(
        &self,
        tenant_id: TenantId,
        actor: UserId,
        event: &GoodsReceived,
    ) -> LedgerResult<PostedEntry> {
        event.validate()?;
        let total = event.total()?;

        let inventory = self.system_account(tenant_id, AccountSubtype::Inventory)?;
        let payable = self.system_account(tenant_id, AccountSubtype::Payable)?;

        let lines = vec![
            JournalEntryLine::debit(inventory.id, total),
            JournalEntryLine::credit(payable.id, total),
        ];

        let meta = EntryMeta::system(
            format!("Goods receipt {}", event.receipt_id),
            Reference::GoodsReceipt(event.receipt_id),
        )
        .on(event.receipt_date);

        let posted = self.journal.create_and_post(tenant_id, meta, lines, actor)?;
        tracing::info!(
            "auto-journaled goods receipt {} for tenant {} (total {})",
            event.receipt_id,
            tenant_id,
            total
        );
        Ok(posted)
    }

    /// Dr Payable(amount); Cr Bank(amount − tds); Cr TDS Payable(tds) if any.
    pub fn post_supplier_paid(
        &self,
        tenant_id: TenantId,
        actor: UserId,
        event: &SupplierPaid,
    ) -> LedgerResult<PostedEntry> {
        event.validate()?;

        let payable = self.system_account(tenant_id, AccountSubtype::Payable)?;
        let bank = self.system_account(tenant_id, AccountSubtype::Bank)?;

        let mut lines = vec![
            JournalEntryLine::debit(payable.id, event.amount),
            JournalEntryLine::credit(bank.id, event.amount - event.tds),
        ];
        if event.tds > 0 {
            let tds = self.system_account(tenant_id, AccountSubtype::TdsPayable)?;
            lines.push(JournalEntryLine::credit(tds.id, event.tds));
        }

        let meta = EntryMeta::system(
            format!("Supplier payment {}", event.payment_id),
            Reference::SupplierPayment(event.payment_id),
        )
        .on(event.payment_date);

        let posted = self.journal.create_and_post(tenant_id, meta, lines, actor)?;
        tracing::info!(
            "auto-journaled supplier payment {} for tenant {} (amount {}, tds {})",
            event.payment_id,
            tenant_id,
            event.amount,
            event.tds
        );
        Ok(posted)
    }

    /// Dr Salary Expense(gross); Cr Salary Payable(net); Cr Tax Payable(tax)
    /// if any; Cr Salary Payable(remainder) if any.
    pub fn post_payroll_run(
        &self,
        tenant_id: TenantId,
        actor: UserId,
        event: &PayrollRun,
    ) -> LedgerResult<PostedEntry> {
        event.validate()?;

        let salary_expense = self.system_account(tenant_id, AccountSubtype::SalaryExpense)?;
        let salary_payable = self.system_account(tenant_id, AccountSubtype::SalaryPayable)?;

        let mut lines = vec![
            JournalEntryLine::debit(salary_expense.id, event.gross),
            JournalEntryLine::credit(salary_payable.id, event.net),
        ];
        if event.tax > 0 {
            let tax = self.system_account(tenant_id, AccountSubtype::TaxPayable)?;
            lines.push(JournalEntryLine::credit(tax.id, event.tax));
        }
        let remainder = event.remainder();
        if remainder > 0 {
            lines.push(
                JournalEntryLine::credit(salary_payable.id, remainder)
                    .with_description("Payroll remainder"),
            );
        }

        let meta = EntryMeta::system(
            format!("Payroll run {}", event.run_id),
            Reference::PayrollRun(event.run_id),
        )
        .on(event.run_date);

        let posted = self.journal.create_and_post(tenant_id, meta, lines, actor)?;
        tracing::info!(
            "auto-journaled payroll run {} for tenant {} (gross {})",
            event.run_id,
            tenant_id,
            event.gross
        );
        Ok(posted)
    }

    /// Dr expense account(total); Cr payment account(total). Explicit account
    /// overrides are honored; otherwise the system operating-expense and cash
    /// accounts apply.
    pub fn post_expense_recorded(
        &self,
        tenant_id: TenantId,
        actor: UserId,
        event: &ExpenseRecorded,
    ) -> LedgerResult<PostedEntry> {
        event.validate()?;

        let expense_account = match event.expense_account_id {
            Some(id) => self.registry.account(tenant_id, id)?,
            None => self.system_account(tenant_id, AccountSubtype::OperatingExpense)?,
        };
        let payment_account = match event.payment_account_id {
            Some(id) => self.registry.account(tenant_id, id)?,
            None => self.system_account(tenant_id, AccountSubtype::Cash)?,
        };

        let lines = vec![
            JournalEntryLine::debit(expense_account.id, event.total),
            JournalEntryLine::credit(payment_account.id, event.total),
        ];

        let meta = EntryMeta::system(
            format!("Expense {}", event.expense_id),
            Reference::Expense(event.expense_id),
        )
        .on(event.expense_date);

        let posted = self.journal.create_and_post(tenant_id, meta, lines, actor)?;
        tracing::info!(
            "auto-journaled expense {} for tenant {} (total {})",
            event.expense_id,
            tenant_id,
            event.total
        );
        Ok(posted)
    }
}

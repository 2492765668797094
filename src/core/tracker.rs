use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::errors::FinanceError;
use crate::finance::{BudgetDraft, FinanceBook, FinanceSummary, TransactionDraft};
use crate::schedule::{
    days_remaining, MonthProgress, PaidReceipt, Payment, PaymentBook, PaymentDraft, Urgency,
};
use crate::storage::StorageBackend;

/// Facade that coordinates the payment schedule, the finance book, the
/// clock, and persistence.
///
/// Mutations apply to the in-memory collections first; the affected
/// collection is then saved as a fire-and-forget side effect. A failed save
/// leaves the in-memory state intact and is reported through a `warn` log.
pub struct Tracker {
    schedule: PaymentBook,
    finance: FinanceBook,
    storage: Box<dyn StorageBackend>,
    clock: Box<dyn Clock>,
}

impl Tracker {
    pub fn new(storage: Box<dyn StorageBackend>) -> Self {
        Self::with_clock(storage, Box::new(SystemClock))
    }

    pub fn with_clock(storage: Box<dyn StorageBackend>, clock: Box<dyn Clock>) -> Self {
        Self {
            schedule: PaymentBook::new(),
            finance: FinanceBook::new(),
            storage,
            clock,
        }
    }

    /// Hydrates both collections from storage. Missing documents start
    /// empty; derived budget spending is realigned to the current month.
    pub fn load(&mut self) -> Result<(), FinanceError> {
        self.schedule = PaymentBook::from_payments(self.storage.load_payments()?);
        self.finance = self.storage.load_book()?;
        let today = self.clock.today();
        self.finance.refresh_spending(today);
        Ok(())
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn schedule(&self) -> &PaymentBook {
        &self.schedule
    }

    pub fn finance(&self) -> &FinanceBook {
        &self.finance
    }

    // Payments

    pub fn add_payment(&mut self, draft: PaymentDraft) -> Result<Uuid, FinanceError> {
        let id = self.schedule.add(draft)?;
        self.persist_payments();
        Ok(id)
    }

    pub fn update_payment(&mut self, id: Uuid, draft: PaymentDraft) -> Result<bool, FinanceError> {
        let changed = self.schedule.update(id, draft)?;
        if changed {
            self.persist_payments();
        }
        Ok(changed)
    }

    pub fn remove_payment(&mut self, id: Uuid) -> bool {
        let removed = self.schedule.remove(id);
        if removed {
            self.persist_payments();
        }
        removed
    }

    pub fn mark_paid(&mut self, id: Uuid) -> Option<PaidReceipt> {
        let receipt = self.schedule.mark_paid(id);
        if receipt.is_some() {
            self.persist_payments();
        }
        receipt
    }

    /// Payments ascending by due date.
    pub fn payments(&self) -> Vec<&Payment> {
        self.schedule.sorted()
    }

    /// Unpaid payments due within the next `days` days.
    pub fn payments_due_within(&self, days: i64) -> Vec<&Payment> {
        self.schedule.due_within(days, self.clock.today())
    }

    pub fn days_until_due(&self, payment: &Payment) -> i64 {
        days_remaining(payment.due_date, self.clock.today())
    }

    pub fn payment_urgency(&self, payment: &Payment) -> Urgency {
        Urgency::of(payment.due_date, self.clock.today())
    }

    /// Completion figures for the current calendar month.
    pub fn current_month_progress(&self) -> MonthProgress {
        let today = self.clock.today();
        self.schedule.month_progress(today.year(), today.month())
    }

    pub fn month_progress(&self, year: i32, month: u32) -> MonthProgress {
        self.schedule.month_progress(year, month)
    }

    // Transactions and budgets

    pub fn add_transaction(&mut self, draft: TransactionDraft) -> Result<Uuid, FinanceError> {
        let today = self.clock.today();
        let id = self.finance.add_transaction(draft, today)?;
        self.persist_book();
        Ok(id)
    }

    pub fn update_transaction(
        &mut self,
        id: Uuid,
        draft: TransactionDraft,
    ) -> Result<bool, FinanceError> {
        let today = self.clock.today();
        let changed = self.finance.update_transaction(id, draft, today)?;
        if changed {
            self.persist_book();
        }
        Ok(changed)
    }

    pub fn remove_transaction(&mut self, id: Uuid) -> bool {
        let today = self.clock.today();
        let removed = self.finance.remove_transaction(id, today);
        if removed {
            self.persist_book();
        }
        removed
    }

    pub fn add_budget(&mut self, draft: BudgetDraft) -> Result<Uuid, FinanceError> {
        let today = self.clock.today();
        let id = self.finance.add_budget(draft, today)?;
        self.persist_book();
        Ok(id)
    }

    pub fn update_budget(&mut self, id: Uuid, draft: BudgetDraft) -> Result<bool, FinanceError> {
        let today = self.clock.today();
        let changed = self.finance.update_budget(id, draft, today)?;
        if changed {
            self.persist_book();
        }
        Ok(changed)
    }

    pub fn remove_budget(&mut self, id: Uuid) -> bool {
        let removed = self.finance.remove_budget(id);
        if removed {
            self.persist_book();
        }
        removed
    }

    pub fn current_spending(&self, category: &str) -> f64 {
        self.finance.current_spending(category, self.clock.today())
    }

    pub fn summary(&self) -> FinanceSummary {
        self.finance.summary()
    }

    fn persist_payments(&self) {
        if let Err(error) = self.storage.save_payments(self.schedule.payments()) {
            tracing::warn!("failed to persist payment collection: {error}");
        }
    }

    fn persist_book(&self) {
        if let Err(error) = self.storage.save_book(&self.finance) {
            tracing::warn!("failed to persist finance book: {error}");
        }
    }
}

use chrono::{Datelike, Duration, NaiveDate};
use uuid::Uuid;

use crate::errors::FinanceError;

use super::payment::{Payment, Recurrence};

/// Editable fields for creating or replacing a payment.
///
/// The `paid` flag is deliberately absent: once a record is settled through
/// [`PaymentBook::mark_paid`] it stays settled.
#[derive(Debug, Clone)]
pub struct PaymentDraft {
    pub name: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub recurrence: Recurrence,
}

impl PaymentDraft {
    fn validate(&self) -> Result<(), FinanceError> {
        if self.name.trim().is_empty() {
            return Err(FinanceError::InvalidInput(
                "payment name must not be empty".into(),
            ));
        }
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(FinanceError::InvalidInput(
                "payment amount must be a positive number".into(),
            ));
        }
        Ok(())
    }
}

/// Outcome of settling a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaidReceipt {
    pub payment_id: Uuid,
    /// Id of the successor inserted for recurring payments.
    pub successor_id: Option<Uuid>,
}

/// Completion figures for one calendar month of payments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthProgress {
    pub total: usize,
    pub completed: usize,
    pub percent: f64,
}

impl MonthProgress {
    fn from_counts(total: usize, completed: usize) -> Self {
        let percent = if total == 0 {
            0.0
        } else {
            completed as f64 / total as f64 * 100.0
        };
        Self {
            total,
            completed,
            percent,
        }
    }
}

/// The in-memory payment collection and its scheduling rules.
#[derive(Debug, Clone, Default)]
pub struct PaymentBook {
    payments: Vec<Payment>,
}

impl PaymentBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_payments(payments: Vec<Payment>) -> Self {
        Self { payments }
    }

    /// Payments in insertion order, as persisted.
    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn payment(&self, id: Uuid) -> Option<&Payment> {
        self.payments.iter().find(|payment| payment.id == id)
    }

    pub fn len(&self) -> usize {
        self.payments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }

    /// Adds a payment and returns its id. The collection is untouched when
    /// validation rejects the draft.
    pub fn add(&mut self, draft: PaymentDraft) -> Result<Uuid, FinanceError> {
        draft.validate()?;
        let payment = Payment::new(draft.name, draft.amount, draft.due_date, draft.recurrence);
        let id = payment.id;
        self.payments.push(payment);
        Ok(id)
    }

    /// Replaces the editable fields of the payment identified by `id`.
    /// Returns `false` when no record matches.
    pub fn update(&mut self, id: Uuid, draft: PaymentDraft) -> Result<bool, FinanceError> {
        draft.validate()?;
        match self.payments.iter_mut().find(|payment| payment.id == id) {
            Some(payment) => {
                payment.name = draft.name;
                payment.amount = draft.amount;
                payment.due_date = draft.due_date;
                payment.recurrence = draft.recurrence;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Removes the payment identified by `id`. Idempotent.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.payments.len();
        self.payments.retain(|payment| payment.id != id);
        self.payments.len() != before
    }

    /// Settles the payment identified by `id`. For recurring payments exactly
    /// one unpaid successor is inserted, due one recurrence unit later.
    /// Already-settled or unknown ids are left untouched and return `None`.
    pub fn mark_paid(&mut self, id: Uuid) -> Option<PaidReceipt> {
        let successor = {
            let payment = self
                .payments
                .iter_mut()
                .find(|payment| payment.id == id && !payment.paid)?;
            payment.paid = true;
            payment
                .recurrence
                .is_recurring()
                .then(|| payment.next_occurrence())
        };
        let successor_id = successor.map(|next| {
            let next_id = next.id;
            self.payments.push(next);
            next_id
        });
        Some(PaidReceipt {
            payment_id: id,
            successor_id,
        })
    }

    /// Payments ascending by due date; ties keep insertion order.
    pub fn sorted(&self) -> Vec<&Payment> {
        let mut items: Vec<&Payment> = self.payments.iter().collect();
        items.sort_by_key(|payment| payment.due_date);
        items
    }

    /// Unpaid payments due on or before `today + days`, soonest first.
    pub fn due_within(&self, days: i64, today: NaiveDate) -> Vec<&Payment> {
        let cutoff = today + Duration::days(days);
        let mut items: Vec<&Payment> = self
            .payments
            .iter()
            .filter(|payment| !payment.paid && payment.due_date <= cutoff)
            .collect();
        items.sort_by_key(|payment| payment.due_date);
        items
    }

    /// Completion figures for the payments due in the given month.
    pub fn month_progress(&self, year: i32, month: u32) -> MonthProgress {
        let mut total = 0;
        let mut completed = 0;
        for payment in &self.payments {
            if payment.due_date.year() == year && payment.due_date.month() == month {
                total += 1;
                if payment.paid {
                    completed += 1;
                }
            }
        }
        MonthProgress::from_counts(total, completed)
    }
}

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::FinanceError;

use super::budget::{Budget, BudgetPeriod};
use super::transaction::{Transaction, TransactionKind};

/// Editable fields for creating or replacing a transaction.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
    pub description: String,
}

impl TransactionDraft {
    fn validate(&self) -> Result<(), FinanceError> {
        if self.category.trim().is_empty() {
            return Err(FinanceError::InvalidInput(
                "transaction category must not be empty".into(),
            ));
        }
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(FinanceError::InvalidInput(
                "transaction amount must be a non-negative number".into(),
            ));
        }
        Ok(())
    }
}

/// Editable fields for creating or replacing a budget.
#[derive(Debug, Clone)]
pub struct BudgetDraft {
    pub category: String,
    pub monthly_limit: f64,
    pub period: BudgetPeriod,
}

impl BudgetDraft {
    fn validate(&self) -> Result<(), FinanceError> {
        if self.category.trim().is_empty() {
            return Err(FinanceError::InvalidInput(
                "budget category must not be empty".into(),
            ));
        }
        if !self.monthly_limit.is_finite() || self.monthly_limit < 0.0 {
            return Err(FinanceError::InvalidInput(
                "budget limit must be a non-negative number".into(),
            ));
        }
        Ok(())
    }
}

/// Portfolio totals computed from the live collections on each read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinanceSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_balance: f64,
    pub total_budget: f64,
    pub total_spent: f64,
    pub total_remaining: f64,
}

/// The transaction and budget collections plus their aggregation rules.
///
/// Budgets hold a derived `current_spent` figure that is recomputed from the
/// full transaction set after every transaction mutation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinanceBook {
    #[serde(default)]
    transactions: Vec<Transaction>,
    #[serde(default)]
    budgets: Vec<Budget>,
}

impl FinanceBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn budget(&self, id: Uuid) -> Option<&Budget> {
        self.budgets.iter().find(|budget| budget.id == id)
    }

    /// Adds a transaction and refreshes every budget's derived spending
    /// against the month of `reference`.
    pub fn add_transaction(
        &mut self,
        draft: TransactionDraft,
        reference: NaiveDate,
    ) -> Result<Uuid, FinanceError> {
        draft.validate()?;
        let txn = Transaction::new(
            draft.kind,
            draft.amount,
            draft.category,
            draft.date,
            draft.description,
        );
        let id = txn.id;
        self.transactions.push(txn);
        self.refresh_spending(reference);
        Ok(id)
    }

    /// Replaces the fields of the transaction identified by `id`. Returns
    /// `false` when no record matches.
    pub fn update_transaction(
        &mut self,
        id: Uuid,
        draft: TransactionDraft,
        reference: NaiveDate,
    ) -> Result<bool, FinanceError> {
        draft.validate()?;
        match self.transactions.iter_mut().find(|txn| txn.id == id) {
            Some(txn) => {
                txn.kind = draft.kind;
                txn.amount = draft.amount;
                txn.category = draft.category;
                txn.date = draft.date;
                txn.description = draft.description;
            }
            None => return Ok(false),
        }
        self.refresh_spending(reference);
        Ok(true)
    }

    /// Removes the transaction identified by `id`. Idempotent.
    pub fn remove_transaction(&mut self, id: Uuid, reference: NaiveDate) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|txn| txn.id != id);
        let removed = self.transactions.len() != before;
        if removed {
            self.refresh_spending(reference);
        }
        removed
    }

    /// Adds a budget. Its `current_spent` is computed from the live
    /// transaction set, not trusted from input.
    pub fn add_budget(
        &mut self,
        draft: BudgetDraft,
        reference: NaiveDate,
    ) -> Result<Uuid, FinanceError> {
        draft.validate()?;
        let mut budget = Budget::new(draft.category, draft.monthly_limit, draft.period);
        budget.current_spent = self.current_spending(&budget.category, reference);
        let id = budget.id;
        self.budgets.push(budget);
        Ok(id)
    }

    /// Replaces the fields of the budget identified by `id`, recomputing its
    /// derived spending. Returns `false` when no record matches.
    pub fn update_budget(
        &mut self,
        id: Uuid,
        draft: BudgetDraft,
        reference: NaiveDate,
    ) -> Result<bool, FinanceError> {
        draft.validate()?;
        let spent = self.current_spending(&draft.category, reference);
        match self.budgets.iter_mut().find(|budget| budget.id == id) {
            Some(budget) => {
                budget.category = draft.category;
                budget.monthly_limit = draft.monthly_limit;
                budget.period = draft.period;
                budget.current_spent = spent;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Removes the budget identified by `id`. Idempotent.
    pub fn remove_budget(&mut self, id: Uuid) -> bool {
        let before = self.budgets.len();
        self.budgets.retain(|budget| budget.id != id);
        self.budgets.len() != before
    }

    /// Sum of expense amounts for `category` inside the calendar month and
    /// year of `reference`.
    pub fn current_spending(&self, category: &str, reference: NaiveDate) -> f64 {
        self.transactions
            .iter()
            .filter(|txn| {
                txn.kind == TransactionKind::Expense
                    && txn.category == category
                    && same_month(txn.date, reference)
            })
            .map(|txn| txn.amount)
            .sum()
    }

    /// Expense transactions feeding a category's current spend.
    pub fn transactions_in_category(
        &self,
        category: &str,
        reference: NaiveDate,
    ) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|txn| {
                txn.kind == TransactionKind::Expense
                    && txn.category == category
                    && same_month(txn.date, reference)
            })
            .collect()
    }

    /// Recomputes `current_spent` for every budget. Full scan by design.
    pub fn refresh_spending(&mut self, reference: NaiveDate) {
        let spent: Vec<f64> = self
            .budgets
            .iter()
            .map(|budget| self.current_spending(&budget.category, reference))
            .collect();
        for (budget, value) in self.budgets.iter_mut().zip(spent) {
            budget.current_spent = value;
        }
    }

    /// Derived portfolio totals, computed on read.
    pub fn summary(&self) -> FinanceSummary {
        let total_income: f64 = self
            .transactions
            .iter()
            .filter(|txn| txn.kind == TransactionKind::Income)
            .map(|txn| txn.amount)
            .sum();
        let total_expenses: f64 = self
            .transactions
            .iter()
            .filter(|txn| txn.kind == TransactionKind::Expense)
            .map(|txn| txn.amount)
            .sum();
        let total_budget: f64 = self.budgets.iter().map(|budget| budget.monthly_limit).sum();
        let total_spent: f64 = self.budgets.iter().map(|budget| budget.current_spent).sum();
        FinanceSummary {
            total_income,
            total_expenses,
            net_balance: total_income - total_expenses,
            total_budget,
            total_spent,
            total_remaining: total_budget - total_spent,
        }
    }
}

fn same_month(date: NaiveDate, reference: NaiveDate) -> bool {
    date.year() == reference.year() && date.month() == reference.month()
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A spending guardrail for a specific category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: Uuid,
    pub category: String,
    pub monthly_limit: f64,
    /// Derived from the transaction set on every mutation; never taken
    /// from input.
    #[serde(default)]
    pub current_spent: f64,
    #[serde(default)]
    pub period: BudgetPeriod,
}

impl Budget {
    pub fn new(category: impl Into<String>, monthly_limit: f64, period: BudgetPeriod) -> Self {
        Self {
            id: Uuid::new_v4(),
            category: category.into(),
            monthly_limit,
            current_spent: 0.0,
            period,
        }
    }

    pub fn remaining(&self) -> f64 {
        self.monthly_limit - self.current_spent
    }
}

/// Enumeration of budgeting periods.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum BudgetPeriod {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bill tracked on the payment calendar.
///
/// Paid records stay in the collection so the history remains append-only;
/// settling a recurring payment inserts a fresh successor instead of moving
/// the original forward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub recurrence: Recurrence,
    #[serde(default)]
    pub paid: bool,
}

impl Payment {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        due_date: NaiveDate,
        recurrence: Recurrence,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            due_date,
            recurrence,
            paid: false,
        }
    }

    /// Builds the unpaid successor scheduled one recurrence unit later.
    pub fn next_occurrence(&self) -> Payment {
        Payment::new(
            self.name.clone(),
            self.amount,
            self.recurrence.advance(self.due_date),
            self.recurrence,
        )
    }
}

/// How often a payment repeats once settled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Recurrence {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Recurrence {
    pub fn is_recurring(&self) -> bool {
        !matches!(self, Recurrence::None)
    }

    /// Next due date one unit after `from`. Month and year steps keep the
    /// day-of-month, clamped to the target month's last day (Jan 31 -> Feb 28).
    pub fn advance(&self, from: NaiveDate) -> NaiveDate {
        match self {
            Recurrence::None => from,
            Recurrence::Daily => from + Duration::days(1),
            Recurrence::Weekly => from + Duration::weeks(1),
            Recurrence::Monthly => shift_month(from, 1),
            Recurrence::Yearly => shift_year(from, 1),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Recurrence::None => "One-off",
            Recurrence::Daily => "Daily",
            Recurrence::Weekly => "Weekly",
            Recurrence::Monthly => "Monthly",
            Recurrence::Yearly => "Yearly",
        }
    }
}

fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    let mut day = date.day();
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    day = day.min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap_or(date)
}

fn shift_year(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    let month = date.month();
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    let last_current = first_next - Duration::days(1);
    last_current.day()
}

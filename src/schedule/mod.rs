//! Recurring payment models, due-date helpers, and the schedule collection.

pub mod book;
pub mod payment;

pub use book::{MonthProgress, PaidReceipt, PaymentBook, PaymentDraft};
pub use payment::{Payment, Recurrence};

use chrono::NaiveDate;

const URGENT_WINDOW_DAYS: i64 = 3;
const SOON_WINDOW_DAYS: i64 = 7;

/// Whole days until `due`, clamped so overdue payments report zero.
pub fn days_remaining(due: NaiveDate, today: NaiveDate) -> i64 {
    (due - today).num_days().max(0)
}

/// How pressing an upcoming due date is, used for calendar and list styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Urgent,
    Soon,
    Normal,
}

impl Urgency {
    pub fn classify(days_remaining: i64) -> Urgency {
        if days_remaining < URGENT_WINDOW_DAYS {
            Urgency::Urgent
        } else if days_remaining < SOON_WINDOW_DAYS {
            Urgency::Soon
        } else {
            Urgency::Normal
        }
    }

    pub fn of(due: NaiveDate, today: NaiveDate) -> Urgency {
        Self::classify(days_remaining(due, today))
    }
}

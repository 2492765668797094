use chrono::NaiveDate;
use finance_core::finance::{
    BudgetDraft, BudgetPeriod, FinanceBook, TransactionDraft, TransactionKind,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn txn(kind: TransactionKind, amount: f64, category: &str, on: NaiveDate) -> TransactionDraft {
    TransactionDraft {
        kind,
        amount,
        category: category.into(),
        date: on,
        description: String::new(),
    }
}

fn budget(category: &str, limit: f64) -> BudgetDraft {
    BudgetDraft {
        category: category.into(),
        monthly_limit: limit,
        period: BudgetPeriod::Monthly,
    }
}

#[test]
fn food_budget_end_to_end() {
    let mut book = FinanceBook::new();
    let reference = date(2024, 1, 20);

    book.add_transaction(
        txn(TransactionKind::Expense, 150.0, "Food", date(2024, 1, 14)),
        reference,
    )
    .expect("valid expense");

    let food = book
        .add_budget(budget("Food", 500.0), reference)
        .expect("valid budget");

    let record = book.budget(food).unwrap();
    assert_eq!(record.current_spent, 150.0);
    assert_eq!(record.remaining(), 350.0);

    let summary = book.summary();
    assert_eq!(summary.total_spent, 150.0);
    assert_eq!(summary.total_remaining, 350.0);
}

#[test]
fn net_balance_is_exact_over_many_entries() {
    let mut book = FinanceBook::new();
    let reference = date(2024, 1, 20);

    let mut expected_income = 0.0;
    let mut expected_expenses = 0.0;
    for day in 1..=28 {
        let amount = day as f64 * 3.25;
        if day % 2 == 0 {
            expected_income += amount;
            book.add_transaction(
                txn(TransactionKind::Income, amount, "Salary", date(2024, 1, day)),
                reference,
            )
            .unwrap();
        } else {
            expected_expenses += amount;
            book.add_transaction(
                txn(TransactionKind::Expense, amount, "Food", date(2024, 1, day)),
                reference,
            )
            .unwrap();
        }
    }

    let summary = book.summary();
    assert_eq!(summary.total_income, expected_income);
    assert_eq!(summary.total_expenses, expected_expenses);
    assert_eq!(summary.net_balance, expected_income - expected_expenses);
}

#[test]
fn budgets_with_no_activity_keep_their_full_limit() {
    let mut book = FinanceBook::new();
    let reference = date(2024, 1, 20);
    book.add_budget(budget("Entertainment", 300.0), reference)
        .unwrap();
    book.add_budget(budget("Transport", 200.0), reference)
        .unwrap();

    let summary = book.summary();
    assert_eq!(summary.total_budget, 500.0);
    assert_eq!(summary.total_spent, 0.0);
    assert_eq!(summary.total_remaining, 500.0);
}

#[test]
fn month_boundary_expenses_stay_out_of_the_window() {
    let mut book = FinanceBook::new();
    let reference = date(2024, 2, 15);
    book.add_transaction(
        txn(TransactionKind::Expense, 99.0, "Food", date(2024, 1, 31)),
        reference,
    )
    .unwrap();
    book.add_transaction(
        txn(TransactionKind::Expense, 42.0, "Food", date(2024, 2, 1)),
        reference,
    )
    .unwrap();
    book.add_transaction(
        txn(TransactionKind::Expense, 17.0, "Food", date(2024, 3, 1)),
        reference,
    )
    .unwrap();

    assert_eq!(book.current_spending("Food", reference), 42.0);
    // The same transactions seen from January only count January.
    assert_eq!(book.current_spending("Food", date(2024, 1, 10)), 99.0);
}

#[test]
fn deleting_the_last_expense_zeroes_the_budget() {
    let mut book = FinanceBook::new();
    let reference = date(2024, 1, 20);
    let id = book
        .add_transaction(
            txn(TransactionKind::Expense, 150.0, "Food", date(2024, 1, 14)),
            reference,
        )
        .unwrap();
    let food = book.add_budget(budget("Food", 500.0), reference).unwrap();
    assert_eq!(book.budget(food).unwrap().current_spent, 150.0);

    assert!(book.remove_transaction(id, reference));
    assert_eq!(book.budget(food).unwrap().current_spent, 0.0);
    assert_eq!(book.summary().total_remaining, 500.0);

    // Removing it again is a harmless no-op.
    assert!(!book.remove_transaction(id, reference));
}

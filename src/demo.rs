//! Sample dataset for trying the tracker out and for tests.

use chrono::NaiveDate;

use crate::core::services::TransactionService;
use crate::ledger::{
    IncomeCategory, SavingsCategory, SpendableCategory, Tracker, Transaction, TransactionKind,
};

/// A tracker pre-filled with a month of income, expenses, savings, and budgets.
pub fn sample_tracker() -> Tracker {
    let mut tracker = Tracker::default();

    tracker.income = vec![
        entry("Freelance Project", 500.0, (2024, 10, 20), "Freelance")
            .with_desc("Payment for web development project"),
        entry("Salary", 3000.0, (2024, 10, 15), "Employment").with_desc("Monthly salary payment"),
        entry("Dividends", 150.75, (2024, 10, 12), "Investments")
            .with_desc("Quarterly dividend earnings"),
        entry("Gift", 200.0, (2024, 10, 10), "Personal").with_desc("Birthday gift from family"),
        entry("Side Hustle", 250.0, (2024, 10, 8), "Freelance").with_desc("Income from weekend job"),
        entry("Investment Sale", 1200.0, (2024, 10, 5), "Investments")
            .with_desc("Proceeds from selling stocks"),
        entry("Bonus", 400.0, (2024, 10, 3), "Employment").with_desc("Performance-based bonus"),
    ];
    tracker.income_categories = ["Freelance", "Employment", "Investments", "Personal"]
        .into_iter()
        .map(|name| IncomeCategory(name.to_string()))
        .collect();

    tracker.expenses = vec![
        entry("Grocery Run", 45.3, (2024, 10, 20), "Groceries"),
        entry("Gas Station", 30.0, (2024, 10, 18), "Transportation"),
        entry("Electric Bill", 60.5, (2024, 10, 15), "Utilities"),
        entry("Dining Out", 25.75, (2024, 10, 17), "Entertainment"),
        entry("Gym Membership", 20.0, (2024, 10, 10), "Health"),
        entry("Coffee Shop", 8.5, (2024, 10, 22), "Food & Drink"),
        entry("Online Subscription", 12.99, (2024, 10, 12), "Entertainment"),
        entry("Pet Supplies", 50.0, (2024, 10, 8), "Pet Care"),
        entry("Water Bill", 25.0, (2024, 10, 5), "Utilities"),
        entry("Medication", 15.99, (2024, 10, 7), "Health"),
    ];
    tracker.expense_categories = vec![
        spendable("Groceries", true, (2024, 10, 1), 2, 200.0),
        spendable("Transportation", true, (2024, 10, 3), 3, 100.0),
        spendable("Utilities", false, (2024, 10, 5), 4, 0.0),
        spendable("Entertainment", true, (2024, 10, 8), 1, 150.0),
        spendable("Health", true, (2024, 10, 12), 2, 75.0),
        spendable("Food & Drink", false, (2024, 10, 15), 3, 0.0),
        spendable("Pet Care", true, (2024, 10, 7), 4, 80.0),
    ];

    tracker.savings = vec![
        entry("Emergency Fund", 1000.0, (2024, 10, 22), "Emergency")
            .with_desc("Monthly contribution to emergency savings"),
        entry("Vacation Fund", 300.0, (2024, 10, 15), "Travel")
            .with_desc("Set aside for future travel expenses"),
        entry("Retirement Savings", 500.0, (2024, 10, 12), "Retirement")
            .with_desc("Contribution to retirement account"),
        entry("Education Fund", 200.0, (2024, 10, 10), "Education")
            .with_desc("Savings for educational courses"),
        entry("Home Renovation", 750.0, (2024, 10, 8), "Home")
            .with_desc("Saved for future home improvements"),
        entry("Health Savings", 150.0, (2024, 10, 5), "Health")
            .with_desc("Funds for unexpected health expenses"),
        entry("Wedding Fund", 600.0, (2024, 10, 3), "Personal")
            .with_desc("Savings for wedding expenses"),
    ];
    tracker.savings_categories = vec![
        goal("Emergency", true, 5000.0),
        goal("Travel", true, 2000.0),
        goal("Retirement", true, 10000.0),
        goal("Education", false, 0.0),
        goal("Home", true, 4000.0),
        goal("Health", true, 1500.0),
        goal("Personal", false, 0.0),
    ];

    for kind in TransactionKind::ALL {
        TransactionService::settle(&mut tracker, kind);
    }
    tracker
}

fn entry(name: &str, amount: f64, (y, m, d): (i32, u32, u32), category: &str) -> Transaction {
    Transaction::new(name, amount, day(y, m, d), category)
}

fn spendable(
    name: &str,
    tracked: bool,
    (y, m, d): (i32, u32, u32),
    num_weeks: u32,
    allowance: f64,
) -> SpendableCategory {
    SpendableCategory {
        name: name.to_string(),
        tracked,
        start_date: Some(day(y, m, d)),
        num_weeks,
        allowance,
    }
}

fn goal(name: &str, tracked: bool, goal: f64) -> SavingsCategory {
    SavingsCategory {
        name: name.to_string(),
        tracked,
        goal,
    }
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_is_sorted_and_keeps_budgets() {
        let tracker = sample_tracker();
        assert_eq!(tracker.expenses.len(), 10);
        assert_eq!(tracker.expenses[0].name, "Coffee Shop");
        assert!(tracker
            .expenses
            .windows(2)
            .all(|pair| pair[0].date >= pair[1].date));

        let groceries = tracker.expense_category("Groceries").unwrap();
        assert!(groceries.tracked);
        assert_eq!(groceries.allowance, 200.0);
        assert_eq!(tracker.expense_categories.len(), 7);
        assert_eq!(
            tracker.category_names(TransactionKind::Income),
            vec!["Freelance", "Employment", "Investments", "Personal"]
        );
    }
}

use chrono::NaiveDate;
use tracing::warn;

use crate::errors::{Result, TrackerError};
use crate::ledger::{
    amount::round_cents, BudgetCycle, SpendableCategory, Tracker, Transaction, TransactionKind,
};

/// Where a tracked spendable budget stands on a given day.
#[derive(Debug, Clone, PartialEq)]
pub struct SpendableStatus {
    pub category: String,
    pub allowance: f64,
    pub num_weeks: u32,
    pub cycle_start: NaiveDate,
    pub renewal_date: NaiveDate,
    pub spent: f64,
    pub remaining: f64,
}

impl SpendableStatus {
    pub fn over_budget(&self) -> bool {
        self.remaining < 0.0
    }
}

pub struct BudgetService;

impl BudgetService {
    /// Date on which a cycle anchored at `start_date` next renews, on or after `now`.
    pub fn renewal_date(start_date: NaiveDate, num_weeks: u32, now: NaiveDate) -> Result<NaiveDate> {
        BudgetCycle::new(start_date, num_weeks)?.renewal_date(now)
    }

    /// Allowance left in the current cycle of `category`.
    ///
    /// Expenses count when they belong to the category and are dated on or
    /// after the cycle start; later-dated expenses are not excluded.
    pub fn remaining_allowance(
        category: &SpendableCategory,
        expenses: &[Transaction],
        now: NaiveDate,
    ) -> Result<f64> {
        let cycle = cycle_of(category)?;
        let spent = spent_since(category, expenses, cycle.cycle_start(now)?);
        Ok(round_cents(category.allowance - spent))
    }

    pub fn status(
        category: &SpendableCategory,
        expenses: &[Transaction],
        now: NaiveDate,
    ) -> Result<SpendableStatus> {
        let cycle = cycle_of(category)?;
        let cycle_start = cycle.cycle_start(now)?;
        let spent = spent_since(category, expenses, cycle_start);
        Ok(SpendableStatus {
            category: category.name.clone(),
            allowance: category.allowance,
            num_weeks: category.num_weeks,
            cycle_start,
            renewal_date: cycle.renewal_date(now)?,
            spent: round_cents(spent),
            remaining: round_cents(category.allowance - spent),
        })
    }

    /// Status of every tracked expense category, skipping misconfigured ones.
    pub fn spendable_status(tracker: &Tracker, now: NaiveDate) -> Vec<SpendableStatus> {
        let expenses = tracker.transactions(TransactionKind::Expense);
        tracker
            .expense_categories
            .iter()
            .filter(|category| category.tracked)
            .filter_map(|category| match Self::status(category, expenses, now) {
                Ok(status) => Some(status),
                Err(err) => {
                    warn!(category = %category.name, error = %err, "skipping spendable budget");
                    None
                }
            })
            .collect()
    }
}

fn cycle_of(category: &SpendableCategory) -> Result<BudgetCycle> {
    let start = category.start_date.ok_or_else(|| {
        TrackerError::InvalidArgument(format!(
            "spendable budget `{}` has no start date",
            category.name
        ))
    })?;
    BudgetCycle::new(start, category.num_weeks)
}

fn spent_since(category: &SpendableCategory, expenses: &[Transaction], from: NaiveDate) -> f64 {
    expenses
        .iter()
        .filter(|txn| txn.in_category(&category.name) && txn.date >= from)
        .map(|txn| txn.amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::category::TrackedCategory;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn groceries() -> SpendableCategory {
        SpendableCategory {
            name: "Groceries".into(),
            tracked: true,
            start_date: Some(date(2024, 10, 1)),
            num_weeks: 2,
            allowance: 200.0,
        }
    }

    #[test]
    fn renewal_date_scenario() {
        let renewal = BudgetService::renewal_date(date(2024, 10, 1), 2, date(2024, 10, 20)).unwrap();
        assert_eq!(renewal, date(2024, 10, 29));
    }

    #[test]
    fn renewal_date_rejects_zero_weeks() {
        let err = BudgetService::renewal_date(date(2024, 10, 1), 0, date(2024, 10, 20)).unwrap_err();
        assert!(matches!(err, TrackerError::InvalidArgument(_)));
    }

    #[test]
    fn remaining_allowance_scenario() {
        let expenses = vec![Transaction::new("Grocery Run", 45.30, date(2024, 10, 16), "Groceries")];
        let remaining =
            BudgetService::remaining_allowance(&groceries(), &expenses, date(2024, 10, 20)).unwrap();
        assert_eq!(remaining, 154.7);
    }

    #[test]
    fn remaining_allowance_without_expenses_is_full_allowance() {
        let remaining =
            BudgetService::remaining_allowance(&groceries(), &[], date(2024, 10, 20)).unwrap();
        assert_eq!(remaining, 200.0);
    }

    #[test]
    fn ignores_older_cycles_and_other_categories() {
        let expenses = vec![
            Transaction::new("Old run", 80.0, date(2024, 10, 14), "Groceries"),
            Transaction::new("Bus", 20.0, date(2024, 10, 16), "Transportation"),
            Transaction::new("Next week", 10.0, date(2024, 11, 30), "Groceries"),
        ];
        let remaining =
            BudgetService::remaining_allowance(&groceries(), &expenses, date(2024, 10, 20)).unwrap();
        assert_eq!(remaining, 190.0);
    }

    #[test]
    fn overspending_goes_negative() {
        let expenses = vec![Transaction::new("Feast", 250.55, date(2024, 10, 18), "Groceries")];
        let status = BudgetService::status(&groceries(), &expenses, date(2024, 10, 20)).unwrap();
        assert_eq!(status.remaining, -50.55);
        assert!(status.over_budget());
        assert_eq!(status.cycle_start, date(2024, 10, 15));
        assert_eq!(status.renewal_date, date(2024, 10, 29));
    }

    #[test]
    fn huge_week_count_is_an_error_not_a_panic() {
        let err = BudgetService::renewal_date(date(2024, 10, 1), 100_000_000, date(2024, 10, 20))
            .unwrap_err();
        assert!(matches!(err, TrackerError::InvalidArgument(_)));

        let mut category = groceries();
        category.num_weeks = 100_000_000;
        assert!(BudgetService::remaining_allowance(&category, &[], date(2024, 10, 20)).is_err());

        let mut tracker = Tracker::default();
        tracker.expense_categories = vec![category, groceries()];
        let statuses = BudgetService::spendable_status(&tracker, date(2024, 10, 20));
        assert_eq!(statuses.len(), 1);
    }

    #[test]
    fn missing_start_date_is_invalid() {
        let category = SpendableCategory::untracked("Utilities");
        assert!(BudgetService::remaining_allowance(&category, &[], date(2024, 10, 20)).is_err());
    }
}

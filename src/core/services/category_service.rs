use std::collections::HashSet;

use tracing::{debug, info};

use crate::core::validation::{SavingsBudget, SpendableBudget};
use crate::errors::{Result, TrackerError};
use crate::ledger::{
    IncomeCategory, SpendableCategory, TrackedCategory, Tracker, Transaction, TransactionKind,
};

pub struct CategoryService;

impl CategoryService {
    /// Distinct income category names in order of first appearance.
    pub fn derive_income(transactions: &[Transaction]) -> Vec<IncomeCategory> {
        distinct_names(transactions)
            .into_iter()
            .map(|name| IncomeCategory(name.to_string()))
            .collect()
    }

    /// Rebuilds a category list from the names used by `transactions`.
    ///
    /// Entries already present in `previous` keep their budget settings; new
    /// names start untracked; names no longer used are dropped.
    pub fn derive<C: TrackedCategory>(transactions: &[Transaction], previous: &[C]) -> Vec<C> {
        distinct_names(transactions)
            .into_iter()
            .map(|name| {
                previous
                    .iter()
                    .find(|category| category.name() == name)
                    .cloned()
                    .unwrap_or_else(|| C::untracked(name))
            })
            .collect()
    }

    /// Re-derives the category list that belongs to `kind`.
    pub fn refresh(tracker: &mut Tracker, kind: TransactionKind) {
        match kind {
            TransactionKind::Income => {
                tracker.income_categories = Self::derive_income(&tracker.income);
            }
            TransactionKind::Expense => {
                let derived = Self::derive(&tracker.expenses, &tracker.expense_categories);
                log_dropped(&tracker.expense_categories, &derived);
                tracker.expense_categories = derived;
            }
            TransactionKind::Saving => {
                let derived = Self::derive(&tracker.savings, &tracker.savings_categories);
                log_dropped(&tracker.savings_categories, &derived);
                tracker.savings_categories = derived;
            }
        }
    }

    pub fn set_savings_budget(tracker: &mut Tracker, budget: &SavingsBudget) -> Result<()> {
        let category = tracker
            .savings_category_mut(&budget.category)
            .ok_or_else(|| missing("savings", &budget.category))?;
        category.tracked = true;
        category.goal = budget.goal;
        info!(category = %budget.category, goal = budget.goal, "savings budget configured");
        Ok(())
    }

    pub fn update_savings_goal(tracker: &mut Tracker, name: &str, goal: f64) -> Result<()> {
        let category = tracker
            .savings_category_mut(name)
            .ok_or_else(|| missing("savings", name))?;
        if !category.tracked {
            return Err(TrackerError::InvalidArgument(format!(
                "savings category `{name}` has no budget to edit"
            )));
        }
        category.goal = goal;
        info!(category = %name, goal, "savings goal updated");
        Ok(())
    }

    pub fn remove_savings_budget(tracker: &mut Tracker, name: &str) -> Result<()> {
        let category = tracker
            .savings_category_mut(name)
            .ok_or_else(|| missing("savings", name))?;
        category.tracked = false;
        category.goal = 0.0;
        info!(category = %name, "savings budget removed");
        Ok(())
    }

    pub fn set_spendable_budget(tracker: &mut Tracker, budget: &SpendableBudget) -> Result<()> {
        let category = tracker
            .expense_category_mut(&budget.category)
            .ok_or_else(|| missing("expense", &budget.category))?;
        category.tracked = true;
        category.allowance = budget.allowance;
        category.start_date = Some(budget.start_date);
        category.num_weeks = budget.num_weeks;
        info!(
            category = %budget.category,
            allowance = budget.allowance,
            weeks = budget.num_weeks,
            "spendable budget configured"
        );
        Ok(())
    }

    pub fn remove_spendable_budget(tracker: &mut Tracker, name: &str) -> Result<()> {
        let category = tracker
            .expense_category_mut(name)
            .ok_or_else(|| missing("expense", name))?;
        *category = SpendableCategory::untracked(name);
        info!(category = %name, "spendable budget removed");
        Ok(())
    }
}

fn distinct_names(transactions: &[Transaction]) -> Vec<&str> {
    let mut seen = HashSet::new();
    transactions
        .iter()
        .map(|txn| txn.category.as_str())
        .filter(|name| !name.is_empty() && seen.insert(*name))
        .collect()
}

fn log_dropped<C: TrackedCategory>(previous: &[C], derived: &[C]) {
    for category in previous.iter().filter(|category| category.is_tracked()) {
        if !derived.iter().any(|kept| kept.name() == category.name()) {
            debug!(category = category.name(), "dropping budget of unused category");
        }
    }
}

fn missing(kind: &str, name: &str) -> TrackerError {
    TrackerError::NotFound(format!("{kind} category `{name}`"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::SavingsCategory;
    use chrono::NaiveDate;

    fn txn(category: &str) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2024, 10, 1).unwrap();
        Transaction::new("entry", 10.0, date, category)
    }

    #[test]
    fn derivation_keeps_first_occurrence_order() {
        let txns = vec![txn("Travel"), txn("Home"), txn("Travel"), txn("Emergency")];
        let income = CategoryService::derive_income(&txns);
        let names: Vec<&str> = income.iter().map(IncomeCategory::as_str).collect();
        assert_eq!(names, vec!["Travel", "Home", "Emergency"]);
    }

    #[test]
    fn derivation_preserves_tracked_settings_and_defaults_new_names() {
        let previous = vec![SavingsCategory {
            name: "Travel".into(),
            tracked: true,
            goal: 2000.0,
        }];
        let derived = CategoryService::derive(&[txn("Travel"), txn("Boat")], &previous);
        assert_eq!(derived[0], previous[0]);
        assert_eq!(derived[1], SavingsCategory::untracked("Boat"));
    }

    #[test]
    fn derivation_drops_unused_names_and_skips_blank_categories() {
        let previous = vec![
            SpendableCategory::untracked("Old"),
            SpendableCategory::untracked("Fuel"),
        ];
        let derived = CategoryService::derive(&[txn("Fuel"), txn("")], &previous);
        assert_eq!(derived.len(), 1);
        assert_eq!(derived[0].name, "Fuel");
    }

    #[test]
    fn spendable_budget_lifecycle() {
        let mut tracker = Tracker::default();
        tracker.expenses.push(txn("Groceries"));
        CategoryService::refresh(&mut tracker, TransactionKind::Expense);

        let start = NaiveDate::from_ymd_opt(2024, 10, 1).unwrap();
        CategoryService::set_spendable_budget(
            &mut tracker,
            &SpendableBudget {
                category: "Groceries".into(),
                allowance: 200.0,
                start_date: start,
                num_weeks: 2,
            },
        )
        .unwrap();
        let category = tracker.expense_category("Groceries").unwrap();
        assert!(category.tracked);
        assert_eq!(category.start_date, Some(start));

        CategoryService::remove_spendable_budget(&mut tracker, "Groceries").unwrap();
        let category = tracker.expense_category("Groceries").unwrap();
        assert!(!category.tracked);
        assert_eq!(category.allowance, 0.0);
        assert_eq!(category.num_weeks, 1);
    }

    #[test]
    fn savings_budget_requires_existing_category() {
        let mut tracker = Tracker::default();
        let err = CategoryService::set_savings_budget(
            &mut tracker,
            &SavingsBudget {
                category: "Travel".into(),
                goal: 100.0,
            },
        )
        .unwrap_err();
        assert!(matches!(err, TrackerError::NotFound(_)));
    }

    #[test]
    fn goal_edit_requires_tracked_budget() {
        let mut tracker = Tracker::default();
        tracker.savings.push(txn("Travel"));
        CategoryService::refresh(&mut tracker, TransactionKind::Saving);
        assert!(CategoryService::update_savings_goal(&mut tracker, "Travel", 50.0).is_err());

        CategoryService::set_savings_budget(
            &mut tracker,
            &SavingsBudget {
                category: "Travel".into(),
                goal: 2000.0,
            },
        )
        .unwrap();
        CategoryService::update_savings_goal(&mut tracker, "Travel", 2500.0).unwrap();
        assert_eq!(tracker.savings_category("Travel").unwrap().goal, 2500.0);

        CategoryService::remove_savings_budget(&mut tracker, "Travel").unwrap();
        let category = tracker.savings_category("Travel").unwrap();
        assert!(!category.tracked);
        assert_eq!(category.goal, 0.0);
    }
}

use tracing::{debug, info};

use crate::core::validation::ValidTransaction;
use crate::errors::{Result, TrackerError};
use crate::ledger::{Tracker, Transaction, TransactionKind};

use super::CategoryService;

pub struct TransactionService;

impl TransactionService {
    /// Records a validated transaction and returns its generated id.
    pub fn add(tracker: &mut Tracker, kind: TransactionKind, input: ValidTransaction) -> String {
        let transaction = from_valid(Transaction::generate_id(), input);
        let id = transaction.id.clone();
        info!(%kind, id = %id, amount = transaction.amount, "transaction added");
        tracker.transactions_mut(kind).push(transaction);
        Self::settle(tracker, kind);
        id
    }

    /// Replaces every field of transaction `id` except the id itself.
    pub fn edit(
        tracker: &mut Tracker,
        kind: TransactionKind,
        id: &str,
        input: ValidTransaction,
    ) -> Result<()> {
        let slot = tracker
            .transactions_mut(kind)
            .iter_mut()
            .find(|txn| txn.id == id)
            .ok_or_else(|| missing(kind, id))?;
        *slot = from_valid(id.to_string(), input);
        info!(%kind, id, "transaction updated");
        Self::settle(tracker, kind);
        Ok(())
    }

    pub fn remove(tracker: &mut Tracker, kind: TransactionKind, id: &str) -> Result<Transaction> {
        let transactions = tracker.transactions_mut(kind);
        let index = transactions
            .iter()
            .position(|txn| txn.id == id)
            .ok_or_else(|| missing(kind, id))?;
        let removed = transactions.remove(index);
        info!(%kind, id, "transaction removed");
        Self::settle(tracker, kind);
        Ok(removed)
    }

    /// Transactions of `kind`, optionally narrowed to one category.
    pub fn list<'a>(
        tracker: &'a Tracker,
        kind: TransactionKind,
        category: Option<&str>,
    ) -> Vec<&'a Transaction> {
        tracker
            .transactions(kind)
            .iter()
            .filter(|txn| category.map_or(true, |name| txn.in_category(name)))
            .collect()
    }

    /// Sorts newest-first and re-derives the categories of `kind`.
    pub fn settle(tracker: &mut Tracker, kind: TransactionKind) {
        sort_newest_first(tracker.transactions_mut(kind));
        CategoryService::refresh(tracker, kind);
        debug!(%kind, count = tracker.transactions(kind).len(), "collection settled");
    }
}

/// Stable sort by date, most recent first.
pub fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
}

fn from_valid(id: String, input: ValidTransaction) -> Transaction {
    Transaction {
        id,
        name: input.name,
        amount: input.amount,
        date: input.date,
        category: input.category,
        desc: input.desc,
    }
}

fn missing(kind: TransactionKind, id: &str) -> TrackerError {
    TrackerError::NotFound(format!("{kind} transaction `{id}`"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::CategoryService;
    use crate::core::validation::SavingsBudget;
    use chrono::NaiveDate;

    fn input(name: &str, amount: f64, day: u32, category: &str) -> ValidTransaction {
        ValidTransaction {
            name: name.into(),
            amount,
            date: NaiveDate::from_ymd_opt(2024, 10, day).unwrap(),
            category: category.into(),
            desc: None,
        }
    }

    #[test]
    fn add_sorts_newest_first_and_derives_categories() {
        let mut tracker = Tracker::default();
        TransactionService::add(
            &mut tracker,
            TransactionKind::Income,
            input("Bonus", 400.0, 3, "Employment"),
        );
        TransactionService::add(
            &mut tracker,
            TransactionKind::Income,
            input("Freelance", 500.0, 20, "Freelance"),
        );
        let names: Vec<&str> = tracker.income.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Freelance", "Bonus"]);
        assert_eq!(
            tracker.category_names(TransactionKind::Income),
            vec!["Freelance", "Employment"]
        );
    }

    #[test]
    fn edit_keeps_id_and_budget_of_surviving_category() {
        let mut tracker = Tracker::default();
        let id = TransactionService::add(
            &mut tracker,
            TransactionKind::Saving,
            input("Vacation", 300.0, 15, "Travel"),
        );
        CategoryService::set_savings_budget(
            &mut tracker,
            &SavingsBudget {
                category: "Travel".into(),
                goal: 2000.0,
            },
        )
        .unwrap();

        TransactionService::edit(
            &mut tracker,
            TransactionKind::Saving,
            &id,
            input("Vacation fund", 350.0, 16, "Travel"),
        )
        .unwrap();

        let edited = tracker.transaction(TransactionKind::Saving, &id).unwrap();
        assert_eq!(edited.amount, 350.0);
        let category = tracker.savings_category("Travel").unwrap();
        assert!(category.tracked);
        assert_eq!(category.goal, 2000.0);
    }

    #[test]
    fn removing_last_transaction_drops_category() {
        let mut tracker = Tracker::default();
        let id = TransactionService::add(
            &mut tracker,
            TransactionKind::Expense,
            input("Coffee", 8.5, 22, "Food & Drink"),
        );
        let removed = TransactionService::remove(&mut tracker, TransactionKind::Expense, &id).unwrap();
        assert_eq!(removed.name, "Coffee");
        assert!(tracker.expense_categories.is_empty());
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut tracker = Tracker::default();
        let err = TransactionService::remove(&mut tracker, TransactionKind::Income, "nope").unwrap_err();
        assert!(matches!(err, TrackerError::NotFound(_)));
        let err = TransactionService::edit(
            &mut tracker,
            TransactionKind::Income,
            "nope",
            input("x", 1.0, 1, "y"),
        )
        .unwrap_err();
        assert!(matches!(err, TrackerError::NotFound(_)));
    }

    #[test]
    fn list_filters_by_category() {
        let mut tracker = Tracker::default();
        for (name, category) in [("a", "One"), ("b", "Two"), ("c", "One")] {
            TransactionService::add(
                &mut tracker,
                TransactionKind::Expense,
                input(name, 1.0, 1, category),
            );
        }
        assert_eq!(
            TransactionService::list(&tracker, TransactionKind::Expense, Some("One")).len(),
            2
        );
        assert_eq!(
            TransactionService::list(&tracker, TransactionKind::Expense, None).len(),
            3
        );
    }
}

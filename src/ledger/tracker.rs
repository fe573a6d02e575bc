use super::{
    category::{IncomeCategory, SavingsCategory, SpendableCategory},
    transaction::{Transaction, TransactionKind},
};

/// Newest persisted layout this build reads and writes.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

pub const DEFAULT_USER: &str = "User";

/// In-memory view of everything the tracker persists.
#[derive(Debug, Clone, PartialEq)]
pub struct Tracker {
    pub user: String,
    pub income: Vec<Transaction>,
    pub income_categories: Vec<IncomeCategory>,
    pub expenses: Vec<Transaction>,
    pub expense_categories: Vec<SpendableCategory>,
    pub savings: Vec<Transaction>,
    pub savings_categories: Vec<SavingsCategory>,
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new(DEFAULT_USER)
    }
}

impl Tracker {
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            income: Vec::new(),
            income_categories: Vec::new(),
            expenses: Vec::new(),
            expense_categories: Vec::new(),
            savings: Vec::new(),
            savings_categories: Vec::new(),
        }
    }

    pub fn transactions(&self, kind: TransactionKind) -> &[Transaction] {
        match kind {
            TransactionKind::Income => &self.income,
            TransactionKind::Expense => &self.expenses,
            TransactionKind::Saving => &self.savings,
        }
    }

    pub fn transactions_mut(&mut self, kind: TransactionKind) -> &mut Vec<Transaction> {
        match kind {
            TransactionKind::Income => &mut self.income,
            TransactionKind::Expense => &mut self.expenses,
            TransactionKind::Saving => &mut self.savings,
        }
    }

    pub fn transaction(&self, kind: TransactionKind, id: &str) -> Option<&Transaction> {
        self.transactions(kind).iter().find(|txn| txn.id == id)
    }

    pub fn transactions_in<'a>(
        &'a self,
        kind: TransactionKind,
        category: &'a str,
    ) -> impl Iterator<Item = &'a Transaction> + 'a {
        self.transactions(kind)
            .iter()
            .filter(move |txn| txn.in_category(category))
    }

    /// Category names of a collection in their stored order.
    pub fn category_names(&self, kind: TransactionKind) -> Vec<String> {
        match kind {
            TransactionKind::Income => self
                .income_categories
                .iter()
                .map(|category| category.as_str().to_string())
                .collect(),
            TransactionKind::Expense => self
                .expense_categories
                .iter()
                .map(|category| category.name.clone())
                .collect(),
            TransactionKind::Saving => self
                .savings_categories
                .iter()
                .map(|category| category.name.clone())
                .collect(),
        }
    }

    pub fn savings_category(&self, name: &str) -> Option<&SavingsCategory> {
        self.savings_categories
            .iter()
            .find(|category| category.name == name)
    }

    pub fn savings_category_mut(&mut self, name: &str) -> Option<&mut SavingsCategory> {
        self.savings_categories
            .iter_mut()
            .find(|category| category.name == name)
    }

    pub fn expense_category(&self, name: &str) -> Option<&SpendableCategory> {
        self.expense_categories
            .iter()
            .find(|category| category.name == name)
    }

    pub fn expense_category_mut(&mut self, name: &str) -> Option<&mut SpendableCategory> {
        self.expense_categories
            .iter_mut()
            .find(|category| category.name == name)
    }

    pub fn transaction_count(&self) -> usize {
        self.income.len() + self.expenses.len() + self.savings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn filters_by_kind_and_category() {
        let date = NaiveDate::from_ymd_opt(2024, 10, 1).unwrap();
        let mut tracker = Tracker::default();
        tracker
            .expenses
            .push(Transaction::new("Milk", 3.5, date, "Groceries"));
        tracker
            .expenses
            .push(Transaction::new("Bus", 2.0, date, "Transportation"));
        tracker
            .savings
            .push(Transaction::new("Rainy day", 50.0, date, "Groceries"));

        let groceries: Vec<_> = tracker
            .transactions_in(TransactionKind::Expense, "Groceries")
            .collect();
        assert_eq!(groceries.len(), 1);
        assert_eq!(groceries[0].name, "Milk");
        assert_eq!(tracker.transaction_count(), 3);
        assert_eq!(tracker.user, DEFAULT_USER);
    }
}

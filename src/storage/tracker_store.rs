use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    errors::{Result, TrackerError},
    ledger::{
        IncomeCategory, SavingsCategory, SpendableCategory, Tracker, Transaction,
        CURRENT_SCHEMA_VERSION, DEFAULT_USER,
    },
};

use super::{keys, KeyValueStore, KeyValueStoreExt};

/// Typed access to the tracker collections kept in a [`KeyValueStore`].
#[derive(Debug)]
pub struct TrackerStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> TrackerStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Stored layout version; stores written before versioning report `0`.
    pub fn schema_version(&self) -> Result<u32> {
        self.store.get(keys::SCHEMA_VERSION, 0u32)
    }

    /// Reads every collection, using empty defaults for missing keys.
    pub fn load(&self) -> Result<Tracker> {
        let found = self.schema_version()?;
        if found > CURRENT_SCHEMA_VERSION {
            return Err(TrackerError::UnsupportedSchema {
                found,
                supported: CURRENT_SCHEMA_VERSION,
            });
        }
        if found < CURRENT_SCHEMA_VERSION {
            debug!(found, "reading unversioned store");
        }

        let mut tracker = Tracker::new(self.user()?);
        tracker.income = self.store.get::<Vec<Transaction>>(keys::INCOME, Vec::new())?;
        tracker.income_categories = self
            .store
            .get::<Vec<IncomeCategory>>(keys::INCOME_CATEGORIES, Vec::new())?;
        tracker.expenses = self.store.get::<Vec<Transaction>>(keys::EXPENSES, Vec::new())?;
        tracker.expense_categories = self
            .store
            .get::<Vec<SpendableCategory>>(keys::EXPENSES_CATEGORIES, Vec::new())?;
        tracker.savings = self.store.get::<Vec<Transaction>>(keys::SAVINGS, Vec::new())?;
        tracker.savings_categories = self
            .store
            .get::<Vec<SavingsCategory>>(keys::SAVINGS_CATEGORIES, Vec::new())?;

        for category in &mut tracker.expense_categories {
            if category.num_weeks == 0 {
                warn!(category = %category.name, "stored cycle length of 0 weeks reset to 1");
                category.num_weeks = SpendableCategory::default_weeks();
            }
        }
        Ok(tracker)
    }

    /// Writes every collection and stamps the current layout version in a
    /// single store update.
    pub fn save(&mut self, tracker: &Tracker) -> Result<()> {
        let entries = vec![
            entry(keys::USER, &tracker.user)?,
            entry(keys::INCOME, &tracker.income)?,
            entry(keys::INCOME_CATEGORIES, &tracker.income_categories)?,
            entry(keys::EXPENSES, &tracker.expenses)?,
            entry(keys::EXPENSES_CATEGORIES, &tracker.expense_categories)?,
            entry(keys::SAVINGS, &tracker.savings)?,
            entry(keys::SAVINGS_CATEGORIES, &tracker.savings_categories)?,
            entry(keys::SCHEMA_VERSION, &CURRENT_SCHEMA_VERSION)?,
        ];
        self.store.set_many(entries)?;
        debug!(
            transactions = tracker.transaction_count(),
            "tracker saved"
        );
        Ok(())
    }

    pub fn user(&self) -> Result<String> {
        let user: String = self.store.get(keys::USER, DEFAULT_USER.to_string())?;
        if user.trim().is_empty() {
            return Ok(DEFAULT_USER.to_string());
        }
        Ok(user)
    }

    pub fn set_user(&mut self, user: &str) -> Result<()> {
        self.store.set(keys::USER, user)
    }
}

fn entry<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<(String, Value)> {
    Ok((key.to_string(), serde_json::to_value(value)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ledger::TransactionKind, storage::MemoryStore};
    use chrono::NaiveDate;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_store_loads_defaults() {
        let store = TrackerStore::new(MemoryStore::new());
        let tracker = store.load().unwrap();
        assert_eq!(tracker.user, "User");
        assert_eq!(tracker.transaction_count(), 0);
        assert!(tracker.expense_categories.is_empty());
    }

    #[test]
    fn save_then_load_keeps_collections() {
        let mut tracker = Tracker::new("Ada");
        tracker
            .expenses
            .push(Transaction::new("Milk", 3.5, date(2024, 10, 2), "Groceries"));
        tracker.expense_categories.push(SpendableCategory {
            name: "Groceries".into(),
            tracked: true,
            start_date: Some(date(2024, 10, 1)),
            num_weeks: 2,
            allowance: 200.0,
        });
        tracker.income_categories.push(IncomeCategory("Salary".into()));

        let mut store = TrackerStore::new(MemoryStore::new());
        store.save(&tracker).unwrap();
        assert_eq!(store.schema_version().unwrap(), CURRENT_SCHEMA_VERSION);

        let loaded = store.load().unwrap();
        assert_eq!(loaded, tracker);
        assert_eq!(
            loaded.transactions(TransactionKind::Expense)[0].category,
            "Groceries"
        );
    }

    #[test]
    fn newer_schema_is_refused() {
        let mut inner = MemoryStore::new();
        inner.set(keys::SCHEMA_VERSION, &(CURRENT_SCHEMA_VERSION + 1)).unwrap();
        let err = TrackerStore::new(inner).load().unwrap_err();
        assert!(matches!(err, TrackerError::UnsupportedSchema { found: 2, .. }));
    }

    #[test]
    fn legacy_values_are_read_leniently() {
        let mut inner = MemoryStore::new();
        inner
            .set_value(
                keys::EXPENSES,
                json!([{ "name": "Lunch", "amount": "12.50", "date": "2024-10-03", "category": "Dining Out" }]),
            )
            .unwrap();
        inner
            .set_value(keys::INCOME_CATEGORIES, json!(["Salary", 401]))
            .unwrap();
        inner
            .set_value(
                keys::EXPENSES_CATEGORIES,
                json!([{ "name": "Dining Out", "tracked": false, "startDate": "", "numWeeks": 0, "allowance": 0 }]),
            )
            .unwrap();
        inner.set_value(keys::USER, json!("")).unwrap();

        let tracker = TrackerStore::new(inner).load().unwrap();
        assert_eq!(tracker.user, "User");
        assert_eq!(tracker.expenses[0].amount, 12.5);
        assert!(!tracker.expenses[0].id.is_empty());
        assert_eq!(tracker.income_categories[1].as_str(), "401");
        assert_eq!(tracker.expense_categories[0].num_weeks, 1);
        assert!(tracker.expense_categories[0].start_date.is_none());
    }
}

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::amount::deserialize_amount;
use crate::errors::TrackerError;

/// A single income, expense, or savings record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    #[serde(default = "Transaction::generate_id")]
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
}

impl Transaction {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        date: NaiveDate,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: Self::generate_id(),
            name: name.into(),
            amount,
            date,
            category: category.into(),
            desc: None,
        }
    }

    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        let desc = desc.into();
        self.desc = if desc.trim().is_empty() {
            None
        } else {
            Some(desc)
        };
        self
    }

    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    pub fn in_category(&self, name: &str) -> bool {
        self.category == name
    }
}

/// Selects one of the three transaction collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Income,
    Expense,
    Saving,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 3] = [
        TransactionKind::Income,
        TransactionKind::Expense,
        TransactionKind::Saving,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
            TransactionKind::Saving => "saving",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TransactionKind {
    type Err = TrackerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" | "expenses" => Ok(TransactionKind::Expense),
            "saving" | "savings" => Ok(TransactionKind::Saving),
            other => Err(TrackerError::InvalidArgument(format!(
                "unknown transaction kind `{other}` (expected income, expense, or saving)"
            ))),
        }
    }
}

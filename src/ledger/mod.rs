//! Tracker domain models, persistence-friendly types, and helpers.

pub mod amount;
pub mod category;
pub mod cycle;
pub mod tracker;
pub mod transaction;

pub use category::{IncomeCategory, SavingsCategory, SpendableCategory, TrackedCategory};
pub use cycle::BudgetCycle;
pub use tracker::{Tracker, CURRENT_SCHEMA_VERSION, DEFAULT_USER};
pub use transaction::{Transaction, TransactionKind};

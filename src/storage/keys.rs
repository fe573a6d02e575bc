//! Keys of the persisted layout.

pub const USER: &str = "User";
pub const INCOME: &str = "income";
pub const INCOME_CATEGORIES: &str = "incomeCategories";
pub const EXPENSES: &str = "expenses";
pub const EXPENSES_CATEGORIES: &str = "expensesCategories";
pub const SAVINGS: &str = "savings";
pub const SAVINGS_CATEGORIES: &str = "savingsCategories";
pub const SCHEMA_VERSION: &str = "schemaVersion";

pub const ALL: [&str; 8] = [
    USER,
    INCOME,
    INCOME_CATEGORIES,
    EXPENSES,
    EXPENSES_CATEGORIES,
    SAVINGS,
    SAVINGS_CATEGORIES,
    SCHEMA_VERSION,
];

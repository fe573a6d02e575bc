pub mod budget_service;
pub mod category_service;
pub mod savings_service;
pub mod summary_service;
pub mod transaction_service;

pub use budget_service::{BudgetService, SpendableStatus};
pub use category_service::CategoryService;
pub use savings_service::{SavingsProgress, SavingsService};
pub use summary_service::{CategoryTotal, SummaryService, TrackerSummary};
pub use transaction_service::TransactionService;

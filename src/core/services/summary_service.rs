use crate::ledger::{amount::round_cents, Tracker, TransactionKind};

/// Total of one category within a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Dashboard figures across all three collections.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerSummary {
    pub income: f64,
    pub expenses: f64,
    pub savings: f64,
    pub net: f64,
    pub income_by_category: Vec<CategoryTotal>,
    pub expenses_by_category: Vec<CategoryTotal>,
    pub savings_by_category: Vec<CategoryTotal>,
}

pub struct SummaryService;

impl SummaryService {
    pub fn summarize(tracker: &Tracker) -> TrackerSummary {
        let income = Self::total(tracker, TransactionKind::Income);
        let expenses = Self::total(tracker, TransactionKind::Expense);
        let savings = Self::total(tracker, TransactionKind::Saving);
        TrackerSummary {
            income,
            expenses,
            savings,
            net: round_cents(income - expenses - savings),
            income_by_category: Self::by_category(tracker, TransactionKind::Income),
            expenses_by_category: Self::by_category(tracker, TransactionKind::Expense),
            savings_by_category: Self::by_category(tracker, TransactionKind::Saving),
        }
    }

    pub fn total(tracker: &Tracker, kind: TransactionKind) -> f64 {
        round_cents(tracker.transactions(kind).iter().map(|txn| txn.amount).sum())
    }

    /// Per-category totals in the collection's category order.
    pub fn by_category(tracker: &Tracker, kind: TransactionKind) -> Vec<CategoryTotal> {
        tracker
            .category_names(kind)
            .into_iter()
            .map(|category| {
                let total = round_cents(
                    tracker
                        .transactions_in(kind, &category)
                        .map(|txn| txn.amount)
                        .sum(),
                );
                CategoryTotal { category, total }
            })
            .collect()
    }
}

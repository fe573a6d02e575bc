use tracing::warn;

use crate::errors::{Result, TrackerError};
use crate::ledger::{amount::round_cents, SavingsCategory, Tracker, Transaction};

/// Progress of one tracked savings goal.
#[derive(Debug, Clone, PartialEq)]
pub struct SavingsProgress {
    pub category: String,
    pub goal: f64,
    pub saved: f64,
    pub percentage: f64,
}

pub struct SavingsService;

impl SavingsService {
    /// Sum of every saving recorded under `category`, rounded to cents.
    pub fn total_saved(category: &str, savings: &[Transaction]) -> f64 {
        round_cents(
            savings
                .iter()
                .filter(|txn| txn.in_category(category))
                .map(|txn| txn.amount)
                .sum(),
        )
    }

    /// Share of the goal already saved, as a percentage rounded to two places.
    pub fn percentage_saved(category: &SavingsCategory, savings: &[Transaction]) -> Result<f64> {
        if !category.goal.is_finite() || category.goal <= 0.0 {
            return Err(TrackerError::InvalidArgument(format!(
                "savings category `{}` has no goal set",
                category.name
            )));
        }
        let saved = Self::total_saved(&category.name, savings);
        Ok(round_cents(saved / category.goal * 100.0))
    }

    /// Progress of every tracked savings goal, skipping ones without a usable goal.
    pub fn progress(tracker: &Tracker) -> Vec<SavingsProgress> {
        tracker
            .savings_categories
            .iter()
            .filter(|category| category.tracked)
            .filter_map(|category| {
                match Self::percentage_saved(category, &tracker.savings) {
                    Ok(percentage) => Some(SavingsProgress {
                        category: category.name.clone(),
                        goal: category.goal,
                        saved: Self::total_saved(&category.name, &tracker.savings),
                        percentage,
                    }),
                    Err(err) => {
                        warn!(category = %category.name, error = %err, "skipping savings goal");
                        None
                    }
                }
            })
            .collect()
    }
}

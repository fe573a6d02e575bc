use chrono::{Duration, NaiveDate};

use crate::errors::{Result, TrackerError};

/// Longest cycle accepted, ten years of weeks.
pub const MAX_WEEKS: u32 = 520;

/// A recurring budget period anchored at `start_date` and repeating every
/// `num_weeks` weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetCycle {
    pub start_date: NaiveDate,
    pub num_weeks: u32,
}

impl BudgetCycle {
    /// Fails with `InvalidArgument` when `num_weeks` is zero or above [`MAX_WEEKS`].
    pub fn new(start_date: NaiveDate, num_weeks: u32) -> Result<Self> {
        if num_weeks < 1 {
            return Err(TrackerError::InvalidArgument(
                "a budget cycle must span at least one week".into(),
            ));
        }
        if num_weeks > MAX_WEEKS {
            return Err(TrackerError::InvalidArgument(format!(
                "a budget cycle cannot span more than {MAX_WEEKS} weeks"
            )));
        }
        Ok(Self {
            start_date,
            num_weeks,
        })
    }

    pub fn length(&self) -> Duration {
        Duration::weeks(i64::from(self.num_weeks))
    }

    /// Smallest `start_date + k * num_weeks` weeks (k >= 0) not earlier than `now`.
    pub fn renewal_date(&self, now: NaiveDate) -> Result<NaiveDate> {
        if self.start_date >= now {
            return Ok(self.start_date);
        }
        let step = self.length().num_days();
        let elapsed = (now - self.start_date).num_days();
        let steps = (elapsed + step - 1).div_euclid(step);
        self.start_date
            .checked_add_signed(Duration::days(steps * step))
            .ok_or_else(|| out_of_range(now))
    }

    /// First day of the cycle that ends at the renewal date.
    pub fn cycle_start(&self, now: NaiveDate) -> Result<NaiveDate> {
        self.renewal_date(now)?
            .checked_sub_signed(self.length())
            .ok_or_else(|| out_of_range(now))
    }

    pub fn label(&self) -> String {
        match self.num_weeks {
            1 => "Weekly".into(),
            n => format!("Every {n} weeks"),
        }
    }
}

fn out_of_range(now: NaiveDate) -> TrackerError {
    TrackerError::InvalidArgument(format!("budget cycle around {now} leaves the calendar range"))
}

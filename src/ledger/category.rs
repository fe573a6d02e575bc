use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::amount::{deserialize_amount, deserialize_name};

/// Categories whose budget settings survive re-derivation by name.
pub trait TrackedCategory: Clone {
    fn name(&self) -> &str;

    /// Builds the "budget not configured" entry for a newly seen name.
    fn untracked(name: &str) -> Self;

    fn is_tracked(&self) -> bool;
}

/// A savings category with an optional savings goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavingsCategory {
    #[serde(deserialize_with = "deserialize_name")]
    pub name: String,
    #[serde(default)]
    pub tracked: bool,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub goal: f64,
}

impl TrackedCategory for SavingsCategory {
    fn name(&self) -> &str {
        &self.name
    }

    fn untracked(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tracked: false,
            goal: 0.0,
        }
    }

    fn is_tracked(&self) -> bool {
        self.tracked
    }
}

/// An expense category with an optional recurring spendable allowance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpendableCategory {
    #[serde(deserialize_with = "deserialize_name")]
    pub name: String,
    #[serde(default)]
    pub tracked: bool,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default = "SpendableCategory::default_weeks", alias = "numberOfWeeks")]
    pub num_weeks: u32,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub allowance: f64,
}

impl SpendableCategory {
    pub fn default_weeks() -> u32 {
        1
    }
}

impl TrackedCategory for SpendableCategory {
    fn name(&self) -> &str {
        &self.name
    }

    fn untracked(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tracked: false,
            start_date: None,
            num_weeks: Self::default_weeks(),
            allowance: 0.0,
        }
    }

    fn is_tracked(&self) -> bool {
        self.tracked
    }
}

/// Income categories are bare names; stored numbers are read back as names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct IncomeCategory(#[serde(deserialize_with = "deserialize_name")] pub String);

impl IncomeCategory {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

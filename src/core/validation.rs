//! Field-level validation for transaction and budget forms.
//!
//! Every check runs independently so a submission reports all of its field
//! errors at once instead of stopping at the first failure.

use std::fmt;

use chrono::NaiveDate;

use crate::ledger::amount::{parse_amount, round_cents};
use crate::ledger::cycle::MAX_WEEKS;

/// Placeholder values a category picker shows before anything is chosen.
pub const NO_SELECTION: [&str; 2] = ["Select Category", "select-category"];

/// Picker value meaning "custom category being typed".
pub const CUSTOM_ENTRY: &str = "other-category";

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Amount,
    Date,
    Category,
    Goal,
    Allowance,
    StartDate,
    NumWeeks,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Amount => "amount",
            Field::Date => "date",
            Field::Category => "category",
            Field::Goal => "goal",
            Field::Allowance => "allowance",
            Field::StartDate => "startDate",
            Field::NumWeeks => "numWeeks",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// The collected field errors of one rejected submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: Field, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|error| format!("{}: {}", error.field.label(), error.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Raw transaction form input, exactly as typed.
#[derive(Debug, Clone, Default)]
pub struct TransactionDraft {
    pub name: String,
    pub amount: String,
    pub date: String,
    pub category: String,
    pub desc: String,
}

/// A transaction submission that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidTransaction {
    pub name: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub category: String,
    pub desc: Option<String>,
}

pub fn validate_transaction(draft: &TransactionDraft) -> Result<ValidTransaction, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = draft.name.trim();
    if name.is_empty() {
        errors.push(Field::Name, "Name is required");
    }

    let amount = positive_amount(&draft.amount);
    if amount.is_none() {
        errors.push(
            Field::Amount,
            "Amount must be a number that is greater than 0",
        );
    }

    let date = match parse_date(&draft.date) {
        DateInput::Missing => {
            errors.push(Field::Date, "Date is required");
            None
        }
        DateInput::Malformed => {
            errors.push(Field::Date, "Date must use the YYYY-MM-DD format");
            None
        }
        DateInput::Valid(date) => Some(date),
    };

    let category = selected_category(&draft.category);
    if category.is_none() {
        errors.push(Field::Category, "Must select a category");
    }

    let desc = draft.desc.trim();
    errors.into_result(|| ValidTransaction {
        name: name.to_string(),
        amount: amount.unwrap_or_default(),
        date: date.unwrap_or_default(),
        category: category.unwrap_or_default().to_string(),
        desc: (!desc.is_empty()).then(|| desc.to_string()),
    })
}

#[derive(Debug, Clone, Default)]
pub struct SavingsBudgetDraft {
    pub category: String,
    pub goal: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SavingsBudget {
    pub category: String,
    pub goal: f64,
}

pub fn validate_savings_budget(
    draft: &SavingsBudgetDraft,
) -> Result<SavingsBudget, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let category = selected_category(&draft.category);
    if category.is_none() {
        errors.push(Field::Category, "Please select a category");
    }
    let goal = check_positive(
        &mut errors,
        Field::Goal,
        &draft.goal,
        "Please set a budget higher than 0",
    );

    errors.into_result(|| SavingsBudget {
        category: category.unwrap_or_default().to_string(),
        goal: goal.unwrap_or_default(),
    })
}

/// Validates an edited savings goal on its own.
pub fn validate_goal(raw: &str) -> Result<f64, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let goal = check_positive(
        &mut errors,
        Field::Goal,
        raw,
        "Please set a budget higher than 0",
    );
    errors.into_result(|| goal.unwrap_or_default())
}

#[derive(Debug, Clone, Default)]
pub struct SpendableBudgetDraft {
    pub category: String,
    pub allowance: String,
    pub start_date: String,
    pub num_weeks: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpendableBudget {
    pub category: String,
    pub allowance: f64,
    pub start_date: NaiveDate,
    pub num_weeks: u32,
}

pub fn validate_spendable_budget(
    draft: &SpendableBudgetDraft,
) -> Result<SpendableBudget, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let category = selected_category(&draft.category);
    if category.is_none() {
        errors.push(Field::Category, "Please select a category");
    }

    let allowance = check_positive(
        &mut errors,
        Field::Allowance,
        &draft.allowance,
        "Please set an allowance higher than 0",
    );

    let start_date = match parse_date(&draft.start_date) {
        DateInput::Missing => {
            errors.push(Field::StartDate, "Please select the start date");
            None
        }
        DateInput::Malformed => {
            errors.push(Field::StartDate, "Date must use the YYYY-MM-DD format");
            None
        }
        DateInput::Valid(date) => Some(date),
    };

    let num_weeks = match parse_amount(&draft.num_weeks) {
        Some(weeks) if weeks < 0.0 => {
            errors.push(
                Field::NumWeeks,
                "Please set the number of weeks greater than 0",
            );
            None
        }
        Some(weeks) if weeks > f64::from(MAX_WEEKS) && weeks.is_finite() => {
            errors.push(
                Field::NumWeeks,
                format!("Please set at most {MAX_WEEKS} weeks"),
            );
            None
        }
        Some(weeks) if weeks >= 1.0 && weeks.fract() == 0.0 => Some(weeks as u32),
        _ => {
            errors.push(Field::NumWeeks, "Please enter a valid number");
            None
        }
    };

    errors.into_result(|| SpendableBudget {
        category: category.unwrap_or_default().to_string(),
        allowance: allowance.unwrap_or_default(),
        start_date: start_date.unwrap_or_default(),
        num_weeks: num_weeks.unwrap_or(1),
    })
}

/// Parses and rounds to cents; the rounded value must still be above zero.
fn positive_amount(raw: &str) -> Option<f64> {
    parse_amount(raw)
        .filter(|value| value.is_finite())
        .map(round_cents)
        .filter(|value| *value > 0.0)
}

fn check_positive(
    errors: &mut ValidationErrors,
    field: Field,
    raw: &str,
    not_positive: &str,
) -> Option<f64> {
    match parse_amount(raw) {
        Some(value) if !value.is_finite() || value == 0.0 => {
            errors.push(field, "Please enter a valid number");
            None
        }
        Some(value) if round_cents(value) <= 0.0 => {
            errors.push(field, not_positive);
            None
        }
        Some(value) => Some(round_cents(value)),
        None => {
            errors.push(field, "Please enter a valid number");
            None
        }
    }
}

fn selected_category(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || NO_SELECTION.contains(&trimmed) || trimmed == CUSTOM_ENTRY {
        None
    } else {
        Some(trimmed)
    }
}

enum DateInput {
    Missing,
    Malformed,
    Valid(NaiveDate),
}

fn parse_date(raw: &str) -> DateInput {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return DateInput::Missing;
    }
    match NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        Ok(date) => DateInput::Valid(date),
        Err(_) => DateInput::Malformed,
    }
}

mod common;

use common::date;
use finance_tracker::core::validation::{
    validate_savings_budget, validate_spendable_budget, validate_transaction, Field,
    SavingsBudgetDraft, SpendableBudgetDraft, TransactionDraft,
};

#[test]
fn empty_name_negative_amount_and_missing_date_fail_together() {
    let draft = TransactionDraft {
        name: String::new(),
        amount: "-5".into(),
        date: String::new(),
        category: "Groceries".into(),
        desc: String::new(),
    };
    let errors = validate_transaction(&draft).unwrap_err();
    assert_eq!(errors.len(), 3);
    assert_eq!(errors.get(Field::Name), Some("Name is required"));
    assert_eq!(
        errors.get(Field::Amount),
        Some("Amount must be a number that is greater than 0")
    );
    assert_eq!(errors.get(Field::Date), Some("Date is required"));
    assert!(errors.get(Field::Category).is_none());
}

#[test]
fn valid_submission_is_trimmed_and_rounded() {
    let draft = TransactionDraft {
        name: "  Salary ".into(),
        amount: " 45.30 ".into(),
        date: "2024-10-15".into(),
        category: "Employment".into(),
        desc: "   ".into(),
    };
    let valid = validate_transaction(&draft).unwrap();
    assert_eq!(valid.name, "Salary");
    assert_eq!(valid.date, date(2024, 10, 15));
    assert!(valid.desc.is_none());
    assert_eq!(valid.amount, 45.3);
}

#[test]
fn savings_budget_messages() {
    let missing = validate_savings_budget(&SavingsBudgetDraft {
        category: "Select Category".into(),
        goal: "abc".into(),
    })
    .unwrap_err();
    assert_eq!(missing.get(Field::Category), Some("Please select a category"));
    assert_eq!(missing.get(Field::Goal), Some("Please enter a valid number"));

    let negative = validate_savings_budget(&SavingsBudgetDraft {
        category: "Vacation".into(),
        goal: "-10".into(),
    })
    .unwrap_err();
    assert_eq!(
        negative.get(Field::Goal),
        Some("Please set a budget higher than 0")
    );
}

#[test]
fn spendable_budget_reports_every_field() {
    let errors = validate_spendable_budget(&SpendableBudgetDraft {
        category: String::new(),
        allowance: "-1".into(),
        start_date: String::new(),
        num_weeks: "-2".into(),
    })
    .unwrap_err();
    assert_eq!(errors.len(), 4);
    assert_eq!(
        errors.get(Field::Allowance),
        Some("Please set an allowance higher than 0")
    );
    assert_eq!(
        errors.get(Field::StartDate),
        Some("Please select the start date")
    );
    assert_eq!(
        errors.get(Field::NumWeeks),
        Some("Please set the number of weeks greater than 0")
    );

    let budget = validate_spendable_budget(&SpendableBudgetDraft {
        category: "Groceries".into(),
        allowance: "200".into(),
        start_date: "2024-10-01".into(),
        num_weeks: "2".into(),
    })
    .unwrap();
    assert_eq!(budget.num_weeks, 2);
    assert_eq!(budget.start_date, date(2024, 10, 1));
}

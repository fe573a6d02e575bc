use finance_tracker::{
    core::services::{BudgetService, SavingsService, SummaryService},
    currency::format_amount,
    demo, init,
};
use chrono::NaiveDate;

#[test]
fn sample_data_smoke() {
    init();

    let tracker = demo::sample_tracker();
    let summary = SummaryService::summarize(&tracker);
    assert_eq!(format_amount(summary.net, "$"), "$1,906.72");

    let now = NaiveDate::from_ymd_opt(2024, 10, 20).unwrap();
    for status in BudgetService::spendable_status(&tracker, now) {
        assert!(status.cycle_start <= now);
        assert!(status.renewal_date >= now);
    }
    for progress in SavingsService::progress(&tracker) {
        assert!(progress.goal > 0.0);
        assert!(progress.percentage >= 0.0);
    }
}

#![doc(test(attr(deny(warnings))))]

//! Finance Tracker keeps income, expense, and savings records together with
//! per-category budgets: savings goals and recurring spendable allowances.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod demo;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("finance tracker tracing initialized");
    });
}

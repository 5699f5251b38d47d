#![doc(test(attr(deny(warnings))))]

//! Ledger Core is the aggregation engine of a personal finance tracker:
//! exact currency parsing, form validation, a record store contract, the
//! merged recent-transaction feed and monthly overview totals.

pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;
pub mod validation;

use std::sync::Once;

pub use crate::core::services::{
    CategoryService, Dashboard, DashboardService, ExpenseDraft, ExpenseService, IncomeDraft,
    IncomeService, OverviewService, OverviewStats, ServiceError, ServiceResult, Transaction,
    TransactionFeed, TransactionKind,
};
pub use crate::core::time::{Clock, FixedClock, SystemClock};
pub use currency::{format_currency, parse_currency, Amount, CurrencyError};
pub use errors::{LedgerError, Result};
pub use storage::{Gateway, JsonFileStore, MemoryStore, RecordStore};
pub use validation::{validate_category, validate_income, validate_transaction};

static INIT: Once = Once::new();

/// Installs logging with the default filter.
pub fn init() {
    init_with_filter(None);
}

/// Installs logging, layering `log_filter` over `ledger_core=info`, and logs
/// the crate version once.
pub fn init_with_filter(log_filter: Option<&str>) {
    INIT.call_once(|| {
        utils::init_tracing(log_filter);
        tracing::info!(version = env!("CARGO_PKG_VERSION"), "ledger core ready");
    });
}

use serde::Serialize;
use tracing::debug;

use crate::core::time::Clock;
use crate::domain::{Category, Period};

use super::{
    CategoryService, OverviewService, OverviewStats, ServiceResult, Transaction, TransactionFeed,
};
use crate::storage::RecordStore;

/// Number of feed entries shown when the caller has no preference.
pub const DEFAULT_RECENT_LIMIT: usize = 20;

/// Everything the landing view needs in one read pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub categories: Vec<Category>,
    pub recent_transactions: Vec<Transaction>,
    pub overview: OverviewStats,
    pub period: Period,
}

pub struct DashboardService;

impl DashboardService {
    /// Dashboard for the clock's current month.
    pub fn load(store: &dyn RecordStore, clock: &dyn Clock, limit: usize) -> ServiceResult<Dashboard> {
        Self::load_for(store, Period::current(clock)?, limit)
    }

    pub fn load_for(store: &dyn RecordStore, period: Period, limit: usize) -> ServiceResult<Dashboard> {
        let categories = CategoryService::list(store)?;
        let recent_transactions = TransactionFeed::recent(store, limit)?;
        let overview = OverviewService::summarize(store, period)?;
        debug!(
            categories = categories.len(),
            recent = recent_transactions.len(),
            month = period.month(),
            year = period.year(),
            "dashboard assembled"
        );
        Ok(Dashboard {
            categories,
            recent_transactions,
            overview,
            period,
        })
    }
}

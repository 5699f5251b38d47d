use serde::Serialize;
use tracing::debug;

use crate::currency::Amount;
use crate::domain::{DateField, Expense, Income, Period};
use crate::errors::{LedgerError, Result};
use crate::storage::{Gateway, RecordStore};

/// Income, spending and the difference for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverviewStats {
    pub period: Period,
    pub total_income: Amount,
    pub total_expenses: Amount,
    pub net_savings: Amount,
    /// `true` when net savings are zero or more.
    pub is_positive: bool,
}

fn checked_total(mut amounts: impl Iterator<Item = i64>, label: &str) -> Result<i64> {
    amounts.try_fold(0_i64, |total, cents| {
        total
            .checked_add(cents)
            .ok_or_else(|| LedgerError::Overflow(format!("total {} exceed the cent range", label)))
    })
}

pub struct OverviewService;

impl OverviewService {
    /// Totals for `month` of `year`; rejects months outside `1..=12`.
    pub fn for_period(store: &dyn RecordStore, month: u32, year: i32) -> Result<OverviewStats> {
        let period = Period::new(month, year)?;
        Self::summarize(store, period)
    }

    pub fn summarize(store: &dyn RecordStore, period: Period) -> Result<OverviewStats> {
        let expenses =
            Gateway::<Expense>::find_in_range(store, DateField::ExpenseDate, period.start(), period.end())?;
        let incomes =
            Gateway::<Income>::find_in_range(store, DateField::IncomeDate, period.start(), period.end())?;

        let total_expenses = checked_total(expenses.iter().map(|expense| expense.amount), "expenses")?;
        let total_income = checked_total(incomes.iter().map(|income| income.amount), "income")?;
        let net = total_income.checked_sub(total_expenses).ok_or_else(|| {
            LedgerError::Overflow(format!("net savings for {}/{}", period.month(), period.year()))
        })?;

        debug!(
            month = period.month(),
            year = period.year(),
            expenses = expenses.len(),
            incomes = incomes.len(),
            net,
            "overview computed"
        );

        Ok(OverviewStats {
            period,
            total_income: Amount::from_cents(total_income),
            total_expenses: Amount::from_cents(total_expenses),
            net_savings: Amount::from_cents(net),
            is_positive: net >= 0,
        })
    }
}

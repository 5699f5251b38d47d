//! Merges recent expenses and income into one newest-first feed.
//!
//! Each source is read through its own bounded `find_latest(limit)` call.
//! That window is exact: a record in the merged top `limit` has at most
//! `limit - 1` records ahead of it overall, so fewer than `limit` ahead of it
//! within its own source, and is therefore inside that source's window.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use crate::currency::format_currency;
use crate::domain::{Category, Expense, Income, RecordId};
use crate::errors::Result;
use crate::storage::{Gateway, RecordStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Expense,
    Income,
}

/// Display-ready projection of an expense or an income record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub kind: TransactionKind,
    pub id: RecordId,
    pub name: String,
    /// Formatted, e.g. `$1,234.56`.
    pub amount: String,
    pub amount_cents: i64,
    /// `YYYY-MM-DD`.
    pub date: String,
    pub date_parsed: NaiveDate,
    /// Category name; set only when the expense's reference resolves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<RecordId>,
    pub notes: String,
}

impl Transaction {
    fn from_expense(expense: Expense, categories: &HashMap<RecordId, String>) -> Self {
        let category = expense.category_id.and_then(|id| {
            let name = categories.get(&id).cloned();
            if name.is_none() {
                warn!(expense = expense.id, category = id, "dangling category reference");
            }
            name
        });
        Self {
            kind: TransactionKind::Expense,
            id: expense.id,
            amount: format_currency(expense.amount),
            amount_cents: expense.amount,
            date: expense.expense_date.format("%Y-%m-%d").to_string(),
            date_parsed: expense.expense_date,
            category,
            category_id: expense.category_id,
            name: expense.name,
            notes: expense.notes,
        }
    }

    fn from_income(income: Income) -> Self {
        Self {
            kind: TransactionKind::Income,
            id: income.id,
            amount: format_currency(income.amount),
            amount_cents: income.amount,
            date: income.income_date.format("%Y-%m-%d").to_string(),
            date_parsed: income.income_date,
            category: None,
            category_id: None,
            name: income.name,
            notes: income.notes,
        }
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

pub struct TransactionFeed;

impl TransactionFeed {
    /// Up to `limit` transactions, newest date first.
    ///
    /// On equal dates expenses come before income, and within one kind the
    /// more recently created record (higher id) comes first.
    pub fn recent(store: &dyn RecordStore, limit: usize) -> Result<Vec<Transaction>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let expenses = Gateway::<Expense>::find_latest(store, limit)?;
        let incomes = Gateway::<Income>::find_latest(store, limit)?;
        let categories = Self::category_names(store, &expenses)?;

        let mut feed: Vec<Transaction> = expenses
            .into_iter()
            .map(|expense| Transaction::from_expense(expense, &categories))
            .chain(incomes.into_iter().map(Transaction::from_income))
            .collect();
        feed.sort_by(|a, b| b.date_parsed.cmp(&a.date_parsed));
        feed.truncate(limit);

        debug!(limit, returned = feed.len(), "recent transactions merged");
        Ok(feed)
    }

    fn category_names(
        store: &dyn RecordStore,
        expenses: &[Expense],
    ) -> Result<HashMap<RecordId, String>> {
        if expenses.iter().all(|expense| expense.category_id.is_none()) {
            return Ok(HashMap::new());
        }
        Ok(Gateway::<Category>::find_all(store)?
            .into_iter()
            .map(|category| (category.id, category.name))
            .collect())
    }
}

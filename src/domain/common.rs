//! Shared traits and enums for ledger records.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Store-assigned identity of a record. Zero means "not yet stored".
pub type RecordId = u64;

/// The record kinds a [`crate::storage::RecordStore`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Category,
    Expense,
    Income,
    RecurringExpense,
    RecurringIncome,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecordKind::Category => "Category",
            RecordKind::Expense => "Expense",
            RecordKind::Income => "Income",
            RecordKind::RecurringExpense => "Recurring expense",
            RecordKind::RecurringIncome => "Recurring income",
        };
        f.write_str(label)
    }
}

/// Date-valued columns that range queries can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateField {
    ExpenseDate,
    IncomeDate,
    StartDate,
    NextDate,
    EndDate,
    CreatedAt,
}

/// Contract every stored entity fulfils so stores can treat kinds uniformly.
pub trait Record: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    const KIND: RecordKind;
    /// Column used to order "latest" reads.
    const ORDER_FIELD: DateField;

    fn id(&self) -> RecordId;

    /// Called by the store when the record is first persisted.
    fn assign_identity(&mut self, id: RecordId, created_at: DateTime<Utc>);

    /// Value of `field` as a timestamp; calendar dates map to midnight.
    /// `None` when the kind has no such column or the value is unset.
    fn date_value(&self, field: DateField) -> Option<NaiveDateTime>;
}

/// Associates records with an optional category.
pub trait BelongsToCategory {
    fn category_id(&self) -> Option<RecordId>;
    fn clear_category(&mut self);
}

pub(crate) fn at_midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// How often a recurring template fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cadence {
    Monthly,
    SemiAnnual,
    Annual,
}

impl Cadence {
    pub fn as_str(self) -> &'static str {
        match self {
            Cadence::Monthly => "monthly",
            Cadence::SemiAnnual => "semi-annual",
            Cadence::Annual => "annual",
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown cadence `{0}` (expected monthly, semi-annual or annual)")]
pub struct ParseCadenceError(pub String);

impl FromStr for Cadence {
    type Err = ParseCadenceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(Cadence::Monthly),
            "semi-annual" => Ok(Cadence::SemiAnnual),
            "annual" => Ok(Cadence::Annual),
            other => Err(ParseCadenceError(other.to_string())),
        }
    }
}

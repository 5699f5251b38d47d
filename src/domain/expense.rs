use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::*;

/// A single spending event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Expense {
    pub id: RecordId,
    pub name: String,
    /// Cents; positive when created through validation.
    pub amount: i64,
    #[serde(default)]
    pub category_id: Option<RecordId>,
    pub expense_date: NaiveDate,
    #[serde(default)]
    pub notes: String,
    /// Template this expense was generated from, if any.
    #[serde(default)]
    pub recurring_id: Option<RecordId>,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(name: impl Into<String>, amount: i64, expense_date: NaiveDate) -> Self {
        Self {
            id: 0,
            name: name.into(),
            amount,
            category_id: None,
            expense_date,
            notes: String::new(),
            recurring_id: None,
            created_at: DateTime::<Utc>::default(),
        }
    }

    pub fn with_category(mut self, category_id: Option<RecordId>) -> Self {
        self.category_id = category_id;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

impl Record for Expense {
    const KIND: RecordKind = RecordKind::Expense;
    const ORDER_FIELD: DateField = DateField::ExpenseDate;

    fn id(&self) -> RecordId {
        self.id
    }

    fn assign_identity(&mut self, id: RecordId, created_at: DateTime<Utc>) {
        self.id = id;
        self.created_at = created_at;
    }

    fn date_value(&self, field: DateField) -> Option<NaiveDateTime> {
        match field {
            DateField::ExpenseDate => Some(at_midnight(self.expense_date)),
            DateField::CreatedAt => Some(self.created_at.naive_utc()),
            _ => None,
        }
    }
}

impl BelongsToCategory for Expense {
    fn category_id(&self) -> Option<RecordId> {
        self.category_id
    }

    fn clear_category(&mut self) {
        self.category_id = None;
    }
}

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::*;

/// A single income event. Income is never categorised.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Income {
    pub id: RecordId,
    pub name: String,
    pub amount: i64,
    pub income_date: NaiveDate,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub recurring_id: Option<RecordId>,
    pub created_at: DateTime<Utc>,
}

impl Income {
    pub fn new(name: impl Into<String>, amount: i64, income_date: NaiveDate) -> Self {
        Self {
            id: 0,
            name: name.into(),
            amount,
            income_date,
            notes: String::new(),
            recurring_id: None,
            created_at: DateTime::<Utc>::default(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

impl Record for Income {
    const KIND: RecordKind = RecordKind::Income;
    const ORDER_FIELD: DateField = DateField::IncomeDate;

    fn id(&self) -> RecordId {
        self.id
    }

    fn assign_identity(&mut self, id: RecordId, created_at: DateTime<Utc>) {
        self.id = id;
        self.created_at = created_at;
    }

    fn date_value(&self, field: DateField) -> Option<NaiveDateTime> {
        match field {
            DateField::IncomeDate => Some(at_midnight(self.income_date)),
            DateField::CreatedAt => Some(self.created_at.naive_utc()),
            _ => None,
        }
    }
}

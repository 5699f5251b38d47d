//! Templates for periodic expenses and income.
//!
//! Only the data model lives here; nothing materialises concrete records from
//! these templates.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecurringExpense {
    pub id: RecordId,
    pub name: String,
    pub amount: i64,
    #[serde(default)]
    pub category_id: Option<RecordId>,
    pub cadence: Cadence,
    pub start_date: NaiveDate,
    pub next_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default = "active_by_default")]
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl RecurringExpense {
    pub fn new(
        name: impl Into<String>,
        amount: i64,
        cadence: Cadence,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            amount,
            category_id: None,
            cadence,
            start_date,
            next_date: start_date,
            end_date: None,
            active: true,
            created_at: DateTime::<Utc>::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecurringIncome {
    pub id: RecordId,
    pub name: String,
    pub amount: i64,
    pub cadence: Cadence,
    pub start_date: NaiveDate,
    pub next_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default = "active_by_default")]
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl RecurringIncome {
    pub fn new(
        name: impl Into<String>,
        amount: i64,
        cadence: Cadence,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            amount,
            cadence,
            start_date,
            next_date: start_date,
            end_date: None,
            active: true,
            created_at: DateTime::<Utc>::default(),
        }
    }
}

fn active_by_default() -> bool {
    true
}

fn schedule_value(
    field: DateField,
    start: NaiveDate,
    next: NaiveDate,
    end: Option<NaiveDate>,
    created_at: DateTime<Utc>,
) -> Option<NaiveDateTime> {
    match field {
        DateField::StartDate => Some(at_midnight(start)),
        DateField::NextDate => Some(at_midnight(next)),
        DateField::EndDate => end.map(at_midnight),
        DateField::CreatedAt => Some(created_at.naive_utc()),
        DateField::ExpenseDate | DateField::IncomeDate => None,
    }
}

impl Record for RecurringExpense {
    const KIND: RecordKind = RecordKind::RecurringExpense;
    const ORDER_FIELD: DateField = DateField::NextDate;

    fn id(&self) -> RecordId {
        self.id
    }

    fn assign_identity(&mut self, id: RecordId, created_at: DateTime<Utc>) {
        self.id = id;
        self.created_at = created_at;
    }

    fn date_value(&self, field: DateField) -> Option<NaiveDateTime> {
        schedule_value(
            field,
            self.start_date,
            self.next_date,
            self.end_date,
            self.created_at,
        )
    }
}

impl BelongsToCategory for RecurringExpense {
    fn category_id(&self) -> Option<RecordId> {
        self.category_id
    }

    fn clear_category(&mut self) {
        self.category_id = None;
    }
}

impl Record for RecurringIncome {
    const KIND: RecordKind = RecordKind::RecurringIncome;
    const ORDER_FIELD: DateField = DateField::NextDate;

    fn id(&self) -> RecordId {
        self.id
    }

    fn assign_identity(&mut self, id: RecordId, created_at: DateTime<Utc>) {
        self.id = id;
        self.created_at = created_at;
    }

    fn date_value(&self, field: DateField) -> Option<NaiveDateTime> {
        schedule_value(
            field,
            self.start_date,
            self.next_date,
            self.end_date,
            self.created_at,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_date_is_only_reported_when_set() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let mut rent = RecurringExpense::new("Rent", 150000, Cadence::Monthly, start);
        assert_eq!(rent.date_value(DateField::EndDate), None);
        assert_eq!(rent.date_value(DateField::ExpenseDate), None);

        rent.end_date = NaiveDate::from_ymd_opt(2026, 12, 1);
        assert_eq!(
            rent.date_value(DateField::EndDate),
            NaiveDate::from_ymd_opt(2026, 12, 1).map(at_midnight)
        );
    }

    #[test]
    fn new_templates_start_active_with_next_date_at_start() {
        let start = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let salary = RecurringIncome::new("Salary", 500000, Cadence::SemiAnnual, start);
        assert!(salary.active);
        assert_eq!(salary.next_date, start);
    }
}

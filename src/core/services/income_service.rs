use tracing::info;

use crate::core::services::ServiceResult;
use crate::core::time::Clock;
use crate::domain::{Income, RecordId};
use crate::storage::{Gateway, RecordStore};
use crate::validation::validate_income;

/// Raw income form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncomeDraft {
    pub name: String,
    pub amount: String,
    pub date: String,
    pub notes: String,
}

impl IncomeDraft {
    pub fn new(name: impl Into<String>, amount: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
            date: date.into(),
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

pub struct IncomeService;

impl IncomeService {
    pub fn create(
        store: &dyn RecordStore,
        clock: &dyn Clock,
        draft: &IncomeDraft,
    ) -> ServiceResult<Income> {
        let (amount, date) =
            validate_income(&draft.name, &draft.amount, &draft.date, clock).into_result()?;
        let income = Income::new(draft.name.trim(), amount, date).with_notes(draft.notes.trim());
        let stored = Gateway::<Income>::create(store, income)?;
        info!(id = stored.id, cents = stored.amount, "income recorded");
        Ok(stored)
    }

    pub fn update(
        store: &dyn RecordStore,
        clock: &dyn Clock,
        id: RecordId,
        draft: &IncomeDraft,
    ) -> ServiceResult<Income> {
        let (amount, date) =
            validate_income(&draft.name, &draft.amount, &draft.date, clock).into_result()?;
        let mut income = Gateway::<Income>::find_by_id(store, id)?;
        income.name = draft.name.trim().to_string();
        income.amount = amount;
        income.income_date = date;
        income.notes = draft.notes.trim().to_string();
        Gateway::<Income>::replace(store, &income)?;
        info!(id, cents = amount, "income updated");
        Ok(income)
    }

    pub fn delete(store: &dyn RecordStore, id: RecordId) -> ServiceResult<()> {
        Gateway::<Income>::delete_by_id(store, id)?;
        Ok(())
    }

    pub fn get(store: &dyn RecordStore, id: RecordId) -> ServiceResult<Income> {
        Ok(Gateway::<Income>::find_by_id(store, id)?)
    }
}

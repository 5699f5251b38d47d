//! Validated create/update/delete for expenses.

use tracing::info;

use crate::core::services::ServiceResult;
use crate::core::time::Clock;
use crate::domain::{Expense, RecordId};
use crate::storage::{Gateway, RecordStore};
use crate::validation::validate_transaction;

/// Raw expense form fields, as entered by a user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub name: String,
    pub amount: String,
    /// `YYYY-MM-DD`; blank means today.
    pub date: String,
    pub notes: String,
    pub category_id: Option<RecordId>,
}

impl ExpenseDraft {
    pub fn new(name: impl Into<String>, amount: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
            date: date.into(),
            ..Self::default()
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

pub struct ExpenseService;

impl ExpenseService {
    pub fn create(
        store: &dyn RecordStore,
        clock: &dyn Clock,
        draft: &ExpenseDraft,
    ) -> ServiceResult<Expense> {
        let (amount, date) =
            validate_transaction(&draft.name, &draft.amount, &draft.date, clock).into_result()?;
        let expense = Expense::new(draft.name.trim(), amount, date)
            .with_category(draft.category_id)
            .with_notes(draft.notes.trim());
        let stored = Gateway::<Expense>::create(store, expense)?;
        info!(id = stored.id, cents = stored.amount, "expense recorded");
        Ok(stored)
    }

    /// Replaces every editable field of expense `id`.
    ///
    /// `created_at` and the recurring template link are kept.
    pub fn update(
        store: &dyn RecordStore,
        clock: &dyn Clock,
        id: RecordId,
        draft: &ExpenseDraft,
    ) -> ServiceResult<Expense> {
        let (amount, date) =
            validate_transaction(&draft.name, &draft.amount, &draft.date, clock).into_result()?;
        let mut expense = Gateway::<Expense>::find_by_id(store, id)?;
        expense.name = draft.name.trim().to_string();
        expense.amount = amount;
        expense.expense_date = date;
        expense.category_id = draft.category_id;
        expense.notes = draft.notes.trim().to_string();
        Gateway::<Expense>::replace(store, &expense)?;
        info!(id, cents = amount, "expense updated");
        Ok(expense)
    }

    pub fn delete(store: &dyn RecordStore, id: RecordId) -> ServiceResult<()> {
        Gateway::<Expense>::delete_by_id(store, id)?;
        Ok(())
    }

    pub fn get(store: &dyn RecordStore, id: RecordId) -> ServiceResult<Expense> {
        Ok(Gateway::<Expense>::find_by_id(store, id)?)
    }
}

//! Record store contract consumed by the ledger services, plus the in-memory
//! and JSON-file implementations.

pub mod json_backend;
pub mod memory;

use chrono::NaiveDateTime;

use crate::domain::{
    Category, DateField, Expense, Income, Record, RecordId, RecurringExpense, RecurringIncome,
};
use crate::errors::Result;

pub use json_backend::JsonFileStore;
pub use memory::{MemoryStore, Tables};

/// Read/write access to one record kind.
///
/// Writes are per-record and atomic: create one record, replace one record
/// wholesale, or delete one record. Deleting a record clears optional
/// references to it held by other records instead of deleting them.
pub trait Gateway<R: Record>: Send + Sync {
    /// Every record of the kind, ordered by ascending id.
    fn find_all(&self) -> Result<Vec<R>>;

    /// Fails with [`crate::errors::LedgerError::NotFound`] when `id` is unknown.
    fn find_by_id(&self, id: RecordId) -> Result<R>;

    /// Records whose `field` lies within `start..=end`. Records without a
    /// value for `field` are skipped.
    fn find_in_range(
        &self,
        field: DateField,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<R>>;

    /// Persists `record`, returning it with its assigned id and creation time.
    fn create(&self, record: R) -> Result<R>;

    /// Replaces the stored record that has `record.id()`.
    fn replace(&self, record: &R) -> Result<()>;

    fn delete_by_id(&self, id: RecordId) -> Result<()>;

    /// Up to `limit` records, newest first by the kind's primary date.
    ///
    /// Stores with an ordered index should override this.
    fn find_latest(&self, limit: usize) -> Result<Vec<R>> {
        let mut records = self.find_all()?;
        sort_latest_first(&mut records);
        records.truncate(limit);
        Ok(records)
    }
}

/// The full set of record kinds the ledger reads and writes.
pub trait RecordStore:
    Gateway<Category>
    + Gateway<Expense>
    + Gateway<Income>
    + Gateway<RecurringExpense>
    + Gateway<RecurringIncome>
{
    /// Cheap liveness check for health endpoints.
    fn ping(&self) -> Result<()> {
        Ok(())
    }
}

/// Orders by the kind's primary date descending, then by id descending.
pub fn sort_latest_first<R: Record>(records: &mut [R]) {
    records.sort_by(|a, b| {
        b.date_value(R::ORDER_FIELD)
            .cmp(&a.date_value(R::ORDER_FIELD))
            .then_with(|| b.id().cmp(&a.id()))
    });
}

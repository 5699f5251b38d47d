use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::time::{Clock, SystemClock};
use crate::domain::{
    BelongsToCategory, Category, DateField, Expense, Income, Record, RecordId, RecordKind,
    RecurringExpense, RecurringIncome,
};
use crate::errors::{LedgerError, Result};

use super::{Gateway, RecordStore};

/// Rows of one record kind plus the last id handed out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table<R> {
    #[serde(default)]
    last_id: RecordId,
    #[serde(default = "BTreeMap::new")]
    rows: BTreeMap<RecordId, R>,
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Self {
            last_id: 0,
            rows: BTreeMap::new(),
        }
    }
}

impl<R> Table<R> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn contains(&self, id: RecordId) -> bool {
        self.rows.contains_key(&id)
    }
}

/// Every table held by a [`MemoryStore`]; also the JSON snapshot payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tables {
    #[serde(default)]
    pub categories: Table<Category>,
    #[serde(default)]
    pub expenses: Table<Expense>,
    #[serde(default)]
    pub incomes: Table<Income>,
    #[serde(default)]
    pub recurring_expenses: Table<RecurringExpense>,
    #[serde(default)]
    pub recurring_incomes: Table<RecurringIncome>,
}

/// Binds a record kind to its table and its integrity rules.
pub trait MemoryTable: Record {
    fn table(tables: &Tables) -> &Table<Self>;
    fn table_mut(tables: &mut Tables) -> &mut Table<Self>;

    /// Rejects references to rows that do not exist and values that must be
    /// unique but are already taken. Runs under the write lock.
    fn check_references(&self, _tables: &Tables) -> Result<()> {
        Ok(())
    }

    /// Clears references to a deleted row; returns how many rows changed.
    fn detach_dependents(_id: RecordId, _tables: &mut Tables) -> usize {
        0
    }
}

fn require(present: bool, owner: RecordKind, target: RecordKind, id: RecordId) -> Result<()> {
    if present {
        Ok(())
    } else {
        Err(LedgerError::Constraint(format!(
            "{} references missing {} {}",
            owner, target, id
        )))
    }
}

fn uncategorise<R: BelongsToCategory>(table: &mut Table<R>, category_id: RecordId) -> usize {
    let mut detached = 0;
    for row in table.rows.values_mut() {
        if row.category_id() == Some(category_id) {
            row.clear_category();
            detached += 1;
        }
    }
    detached
}

impl MemoryTable for Category {
    fn table(tables: &Tables) -> &Table<Self> {
        &tables.categories
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.categories
    }

    /// Names are unique ignoring case and surrounding whitespace.
    fn check_references(&self, tables: &Tables) -> Result<()> {
        let taken = tables
            .categories
            .rows
            .values()
            .any(|other| other.id != self.id && other.has_name(&self.name));
        if taken {
            return Err(LedgerError::Duplicate {
                kind: Self::KIND,
                name: self.name.trim().to_string(),
            });
        }
        Ok(())
    }

    fn detach_dependents(id: RecordId, tables: &mut Tables) -> usize {
        uncategorise(&mut tables.expenses, id) + uncategorise(&mut tables.recurring_expenses, id)
    }
}

impl MemoryTable for Expense {
    fn table(tables: &Tables) -> &Table<Self> {
        &tables.expenses
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.expenses
    }

    fn check_references(&self, tables: &Tables) -> Result<()> {
        if let Some(category_id) = self.category_id {
            require(
                tables.categories.contains(category_id),
                Self::KIND,
                RecordKind::Category,
                category_id,
            )?;
        }
        if let Some(recurring_id) = self.recurring_id {
            require(
                tables.recurring_expenses.contains(recurring_id),
                Self::KIND,
                RecordKind::RecurringExpense,
                recurring_id,
            )?;
        }
        Ok(())
    }
}

impl MemoryTable for Income {
    fn table(tables: &Tables) -> &Table<Self> {
        &tables.incomes
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.incomes
    }

    fn check_references(&self, tables: &Tables) -> Result<()> {
        if let Some(recurring_id) = self.recurring_id {
            require(
                tables.recurring_incomes.contains(recurring_id),
                Self::KIND,
                RecordKind::RecurringIncome,
                recurring_id,
            )?;
        }
        Ok(())
    }
}

impl MemoryTable for RecurringExpense {
    fn table(tables: &Tables) -> &Table<Self> {
        &tables.recurring_expenses
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.recurring_expenses
    }

    fn check_references(&self, tables: &Tables) -> Result<()> {
        if let Some(category_id) = self.category_id {
            require(
                tables.categories.contains(category_id),
                Self::KIND,
                RecordKind::Category,
                category_id,
            )?;
        }
        Ok(())
    }

    fn detach_dependents(id: RecordId, tables: &mut Tables) -> usize {
        let mut detached = 0;
        for expense in tables.expenses.rows.values_mut() {
            if expense.recurring_id == Some(id) {
                expense.recurring_id = None;
                detached += 1;
            }
        }
        detached
    }
}

impl MemoryTable for RecurringIncome {
    fn table(tables: &Tables) -> &Table<Self> {
        &tables.recurring_incomes
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.recurring_incomes
    }

    fn detach_dependents(id: RecordId, tables: &mut Tables) -> usize {
        let mut detached = 0;
        for income in tables.incomes.rows.values_mut() {
            if income.recurring_id == Some(id) {
                income.recurring_id = None;
                detached += 1;
            }
        }
        detached
    }
}

/// Thread-safe in-process record store.
///
/// Readers share an `RwLock`; each write holds the lock for exactly one
/// record change, so writes are serialized and atomic per record.
pub struct MemoryStore {
    tables: RwLock<Tables>,
    clock: Arc<dyn Clock>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::from_tables(Tables::default(), clock)
    }

    pub fn from_tables(tables: Tables, clock: Arc<dyn Clock>) -> Self {
        Self {
            tables: RwLock::new(tables),
            clock,
        }
    }

    /// Copy of every table, e.g. for persisting.
    pub fn snapshot(&self) -> Result<Tables> {
        Ok(self.read()?.clone())
    }

    /// Swaps in `tables` wholesale.
    pub fn restore(&self, tables: Tables) -> Result<()> {
        *self.write()? = tables;
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| LedgerError::Storage("record store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| LedgerError::Storage("record store lock poisoned".into()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: MemoryTable> Gateway<R> for MemoryStore {
    fn find_all(&self) -> Result<Vec<R>> {
        let tables = self.read()?;
        Ok(R::table(&tables).rows.values().cloned().collect())
    }

    fn find_by_id(&self, id: RecordId) -> Result<R> {
        let tables = self.read()?;
        R::table(&tables)
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| LedgerError::not_found(R::KIND, id))
    }

    fn find_in_range(
        &self,
        field: DateField,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<R>> {
        let tables = self.read()?;
        let matches: Vec<R> = R::table(&tables)
            .rows
            .values()
            .filter(|record| {
                record
                    .date_value(field)
                    .is_some_and(|value| start <= value && value <= end)
            })
            .cloned()
            .collect();
        debug!(kind = %R::KIND, ?field, %start, %end, count = matches.len(), "range query");
        Ok(matches)
    }

    fn create(&self, mut record: R) -> Result<R> {
        let mut tables = self.write()?;
        let id = R::table(&tables).last_id + 1;
        record.assign_identity(id, self.clock.now());
        record.check_references(&tables)?;
        let table = R::table_mut(&mut tables);
        table.last_id = id;
        table.rows.insert(id, record.clone());
        info!(kind = %R::KIND, id, "record created");
        Ok(record)
    }

    fn replace(&self, record: &R) -> Result<()> {
        let mut tables = self.write()?;
        let id = record.id();
        if !R::table(&tables).contains(id) {
            return Err(LedgerError::not_found(R::KIND, id));
        }
        record.check_references(&tables)?;
        R::table_mut(&mut tables).rows.insert(id, record.clone());
        info!(kind = %R::KIND, id, "record replaced");
        Ok(())
    }

    fn delete_by_id(&self, id: RecordId) -> Result<()> {
        let mut tables = self.write()?;
        if R::table_mut(&mut tables).rows.remove(&id).is_none() {
            return Err(LedgerError::not_found(R::KIND, id));
        }
        let detached = R::detach_dependents(id, &mut tables);
        info!(kind = %R::KIND, id, detached, "record deleted");
        Ok(())
    }
}

impl RecordStore for MemoryStore {
    fn ping(&self) -> Result<()> {
        self.read().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::FixedClock;
    use crate::domain::Cadence;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store() -> MemoryStore {
        MemoryStore::with_clock(Arc::new(FixedClock::on_date(date(2026, 1, 20))))
    }

    #[test]
    fn create_assigns_sequential_ids_and_timestamp() {
        let store = store();
        let first = Gateway::<Expense>::create(&store, Expense::new("Coffee", 450, date(2026, 1, 2)))
            .unwrap();
        let second = Gateway::<Expense>::create(&store, Expense::new("Tea", 300, date(2026, 1, 3)))
            .unwrap();
        assert_eq!((first.id, second.id), (1, 2));
        assert_eq!(first.created_at.date_naive(), date(2026, 1, 20));
    }

    #[test]
    fn find_by_id_reports_missing_kind_and_id() {
        let store = store();
        let err = Gateway::<Income>::find_by_id(&store, 42).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::NotFound {
                kind: RecordKind::Income,
                id: 42
            }
        ));
    }

    #[test]
    fn range_query_is_inclusive_on_both_ends() {
        let store = store();
        for day in [1, 15, 31] {
            Gateway::<Expense>::create(&store, Expense::new("Item", 100, date(2026, 1, day)))
                .unwrap();
        }
        Gateway::<Expense>::create(&store, Expense::new("Late", 100, date(2026, 2, 1))).unwrap();

        let start = date(2026, 1, 1).and_hms_opt(0, 0, 0).unwrap();
        let end = date(2026, 1, 31).and_hms_opt(23, 59, 59).unwrap();
        let found: Vec<Expense> = store
            .find_in_range(DateField::ExpenseDate, start, end)
            .unwrap();
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn deleting_category_clears_references_instead_of_cascading() {
        let store = store();
        let groceries = store.create(Category::new("Groceries", None)).unwrap();
        let expense = Gateway::<Expense>::create(
            &store,
            Expense::new("Bread", 350, date(2026, 1, 5)).with_category(Some(groceries.id)),
        )
        .unwrap();
        let mut template = RecurringExpense::new("Box", 2000, Cadence::Monthly, date(2026, 1, 1));
        template.category_id = Some(groceries.id);
        let template = store.create(template).unwrap();

        Gateway::<Category>::delete_by_id(&store, groceries.id).unwrap();

        let expense: Expense = store.find_by_id(expense.id).unwrap();
        assert_eq!(expense.category_id, None);
        let template: RecurringExpense = store.find_by_id(template.id).unwrap();
        assert_eq!(template.category_id, None);
    }

    #[test]
    fn deleting_recurring_income_detaches_generated_income() {
        let store = store();
        let salary = store
            .create(RecurringIncome::new(
                "Salary",
                500000,
                Cadence::Monthly,
                date(2026, 1, 1),
            ))
            .unwrap();
        let mut paid = Income::new("January salary", 500000, date(2026, 1, 1));
        paid.recurring_id = Some(salary.id);
        let paid = Gateway::<Income>::create(&store, paid).unwrap();

        Gateway::<RecurringIncome>::delete_by_id(&store, salary.id).unwrap();

        let paid: Income = store.find_by_id(paid.id).unwrap();
        assert_eq!(paid.recurring_id, None);
    }

    #[test]
    fn category_names_are_unique_ignoring_case() {
        let store = store();
        let food = store.create(Category::new("Food", None)).unwrap();
        let err = store.create(Category::new(" FOOD ", None)).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Duplicate {
                kind: RecordKind::Category,
                ..
            }
        ));

        let rent = store.create(Category::new("Rent", None)).unwrap();
        assert_eq!(rent.id, food.id + 1);

        let mut renamed = rent.clone();
        renamed.name = "food".into();
        assert!(Gateway::<Category>::replace(&store, &renamed).is_err());

        let mut recolored = food.clone();
        recolored.color = Some("#00FF00".into());
        Gateway::<Category>::replace(&store, &recolored).unwrap();
        assert_eq!(Gateway::<Category>::find_all(&store).unwrap().len(), 2);
    }

    #[test]
    fn writes_reject_dangling_references() {
        let store = store();
        let err = Gateway::<Expense>::create(
            &store,
            Expense::new("Orphan", 100, date(2026, 1, 1)).with_category(Some(9)),
        )
        .unwrap_err();
        assert!(matches!(err, LedgerError::Constraint(_)));
        assert!(Gateway::<Expense>::find_all(&store).unwrap().is_empty());
    }

    #[test]
    fn replace_and_delete_require_existing_rows() {
        let store = store();
        let mut ghost = Income::new("Ghost", 100, date(2026, 1, 1));
        ghost.id = 7;
        assert!(Gateway::<Income>::replace(&store, &ghost)
            .unwrap_err()
            .is_not_found());
        assert!(Gateway::<Income>::delete_by_id(&store, 7)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn latest_orders_by_date_then_newest_id() {
        let store = store();
        Gateway::<Income>::create(&store, Income::new("A", 100, date(2026, 1, 5))).unwrap();
        Gateway::<Income>::create(&store, Income::new("B", 100, date(2026, 1, 9))).unwrap();
        Gateway::<Income>::create(&store, Income::new("C", 100, date(2026, 1, 5))).unwrap();

        let latest: Vec<Income> = store.find_latest(2).unwrap();
        let names: Vec<&str> = latest.iter().map(|income| income.name.as_str()).collect();
        assert_eq!(names, vec!["B", "C"]);
    }
}

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::time::{Clock, SystemClock};
use crate::domain::{DateField, RecordId};
use crate::errors::{LedgerError, Result};
use crate::utils::persistence::write_atomic;

use super::memory::{MemoryStore, MemoryTable, Tables};
use super::{Gateway, RecordStore};

pub const LEDGER_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct LedgerFile {
    schema_version: u32,
    #[serde(default)]
    tables: Tables,
}

/// A [`MemoryStore`] mirrored to a single pretty-printed JSON file.
///
/// Reads are served from memory. Every successful write rewrites the file via
/// a temporary sibling and a rename; when that fails the in-memory tables are
/// rolled back so memory never runs ahead of disk.
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with_clock(path, Arc::new(SystemClock))
    }

    /// Loads `path` if it exists; a missing file starts an empty ledger.
    pub fn open_with_clock(path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Result<Self> {
        let path = path.into();
        let tables = if path.exists() {
            let data = fs::read_to_string(&path)?;
            let file: LedgerFile = serde_json::from_str(&data)?;
            if file.schema_version > LEDGER_SCHEMA_VERSION {
                return Err(LedgerError::Storage(format!(
                    "ledger file `{}` is from a newer schema version",
                    path.display()
                )));
            }
            file.tables
        } else {
            Tables::default()
        };
        info!(path = %path.display(), "opened ledger file");
        Ok(Self {
            path,
            inner: MemoryStore::from_tables(tables, clock),
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, tables: Tables) -> Result<()> {
        let file = LedgerFile {
            schema_version: LEDGER_SCHEMA_VERSION,
            tables,
        };
        let json = serde_json::to_string_pretty(&file)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }

    fn write_with<T>(&self, op: impl FnOnce(&MemoryStore) -> Result<T>) -> Result<T> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| LedgerError::Storage("ledger file lock poisoned".into()))?;
        let before = self.inner.snapshot()?;
        let outcome = op(&self.inner)?;
        if let Err(err) = self.inner.snapshot().and_then(|after| self.persist(after)) {
            warn!(path = %self.path.display(), error = %err, "rolling back unsaved write");
            self.inner.restore(before)?;
            return Err(err);
        }
        Ok(outcome)
    }
}

impl<R: MemoryTable> Gateway<R> for JsonFileStore {
    fn find_all(&self) -> Result<Vec<R>> {
        Gateway::<R>::find_all(&self.inner)
    }

    fn find_by_id(&self, id: RecordId) -> Result<R> {
        Gateway::<R>::find_by_id(&self.inner, id)
    }

    fn find_in_range(
        &self,
        field: DateField,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<R>> {
        Gateway::<R>::find_in_range(&self.inner, field, start, end)
    }

    fn create(&self, record: R) -> Result<R> {
        self.write_with(|inner| Gateway::<R>::create(inner, record))
    }

    fn replace(&self, record: &R) -> Result<()> {
        self.write_with(|inner| Gateway::<R>::replace(inner, record))
    }

    fn delete_by_id(&self, id: RecordId) -> Result<()> {
        self.write_with(|inner| Gateway::<R>::delete_by_id(inner, id))
    }
}

impl RecordStore for JsonFileStore {
    fn ping(&self) -> Result<()> {
        self.inner.ping()?;
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() && !dir.is_dir() => Err(
                LedgerError::Storage(format!("ledger directory `{}` is missing", dir.display())),
            ),
            _ => Ok(()),
        }
    }
}

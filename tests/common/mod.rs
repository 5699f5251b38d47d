#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use ledger_core::domain::{Expense, Income};
use ledger_core::{FixedClock, Gateway, MemoryStore};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar date")
}

/// Clock pinned to 2026-01-20.
pub fn clock() -> FixedClock {
    FixedClock::on_date(date(2026, 1, 20))
}

pub fn empty_store() -> MemoryStore {
    MemoryStore::with_clock(Arc::new(clock()))
}

/// Two January expenses (10th and 5th) and one income on the 12th.
pub fn seeded_store() -> MemoryStore {
    let store = empty_store();
    Gateway::<Expense>::create(&store, Expense::new("Dinner out", 4_550, date(2026, 1, 10)))
        .expect("seed expense");
    Gateway::<Expense>::create(&store, Expense::new("Fuel", 6_000, date(2026, 1, 5)))
        .expect("seed expense");
    Gateway::<Income>::create(&store, Income::new("Salary", 500_000, date(2026, 1, 12)))
        .expect("seed income");
    store
}

/// Creates a unique directory that outlives the calling test.
pub fn temp_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

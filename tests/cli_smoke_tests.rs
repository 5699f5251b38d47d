mod common;

use std::sync::Arc;

use assert_cmd::Command;
use common::{date, temp_dir};
use ledger_core::domain::Expense;
use ledger_core::{FixedClock, Gateway, JsonFileStore};
use predicates::prelude::*;

#[test]
fn report_on_empty_ledger_shows_zero_net() {
    let home = temp_dir();
    Command::cargo_bin("ledger_report")
        .expect("binary")
        .env("LEDGER_CORE_HOME", &home)
        .args(["1", "2026"])
        .assert()
        .success()
        .stdout(predicate::str::contains("January 2026"))
        .stdout(predicate::str::contains("$0.00"))
        .stdout(predicate::str::contains("No transactions yet."));
}

#[test]
fn report_lists_stored_expenses() {
    let home = temp_dir();
    let store = JsonFileStore::open_with_clock(
        home.join("ledger.json"),
        Arc::new(FixedClock::on_date(date(2026, 2, 1))),
    )
    .expect("open");
    Gateway::<Expense>::create(&store, Expense::new("Train pass", 12_000, date(2026, 2, 3)))
        .expect("expense");

    Command::cargo_bin("ledger_report")
        .expect("binary")
        .env("LEDGER_CORE_HOME", &home)
        .env("NO_COLOR", "1")
        .args(["2", "2026"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Train pass"))
        .stdout(predicate::str::contains("-$120.00"));
}

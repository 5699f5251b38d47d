//! Prints the dashboard for the configured ledger file.
//!
//! Usage: `ledger_report [MONTH] [YEAR]`; omitted or out-of-range values
//! fall back to the current month and year.

use std::env;
use std::process::ExitCode;

use colored::Colorize;
use ledger_core::config::ConfigManager;
use ledger_core::domain::Period;
use ledger_core::storage::RecordStore;
use ledger_core::{Dashboard, DashboardService, JsonFileStore, SystemClock};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let manager = ConfigManager::new()?;
    let config = manager.load()?;
    ledger_core::init_with_filter(config.log_filter.as_deref());

    let args: Vec<String> = env::args().skip(1).collect();
    let period = Period::from_query(
        args.first().map(String::as_str),
        args.get(1).map(String::as_str),
        &SystemClock,
    )?;

    let store = JsonFileStore::open(config.resolved_data_file(manager.base_dir()))?;
    store.ping()?;
    let dashboard = DashboardService::load_for(&store, period, config.recent_limit)?;
    render(&dashboard);
    Ok(())
}

fn render(dashboard: &Dashboard) {
    let overview = &dashboard.overview;
    println!(
        "{}",
        format!("=== {} ===", dashboard.period.start().format("%B %Y")).bold()
    );
    println!("Income:      {}", overview.total_income);
    println!("Expenses:    {}", overview.total_expenses);
    let net = overview.net_savings.to_string();
    let net = if overview.is_positive {
        net.green()
    } else {
        net.red()
    };
    println!("Net savings: {}", net);

    println!();
    println!("{}", "=== Recent transactions ===".bold());
    if dashboard.recent_transactions.is_empty() {
        println!("{}", "No transactions yet.".dimmed());
    }
    for txn in &dashboard.recent_transactions {
        let amount = if txn.is_expense() {
            format!("-{}", txn.amount).red()
        } else {
            format!("+{}", txn.amount).green()
        };
        let category = txn
            .category
            .as_deref()
            .map(|name| format!(" [{}]", name))
            .unwrap_or_default();
        println!("{}  {:>14}  {}{}", txn.date, amount, txn.name, category);
    }

    if !dashboard.categories.is_empty() {
        println!();
        let names: Vec<&str> = dashboard
            .categories
            .iter()
            .map(|category| category.name.as_str())
            .collect();
        println!("Categories: {}", names.join(", "));
    }
}

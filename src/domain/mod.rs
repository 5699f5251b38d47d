//! Pure record types for the ledger: categories, expenses, income and
//! recurring templates. No I/O here.

pub mod category;
pub mod common;
pub mod expense;
pub mod income;
pub mod period;
pub mod recurring;

pub use category::Category;
pub use common::*;
pub use expense::Expense;
pub use income::Income;
pub use period::Period;
pub use recurring::{RecurringExpense, RecurringIncome};

//! Application services layered over a [`crate::storage::RecordStore`].
//!
//! Services are stateless unit structs; every call receives the store (and a
//! clock where dates default to "today") explicitly.

pub mod category_service;
pub mod dashboard_service;
pub mod expense_service;
pub mod income_service;
pub mod overview_service;
pub mod transaction_feed;

pub use category_service::CategoryService;
pub use dashboard_service::{Dashboard, DashboardService, DEFAULT_RECENT_LIMIT};
pub use expense_service::{ExpenseDraft, ExpenseService};
pub use income_service::{IncomeDraft, IncomeService};
pub use overview_service::{OverviewService, OverviewStats};
pub use transaction_feed::{Transaction, TransactionFeed, TransactionKind};

use crate::errors::LedgerError;
use crate::validation::ValidationErrors;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(ValidationErrors),
    #[error("{0}")]
    Duplicate(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl ServiceError {
    /// Rule failures, when the input itself was rejected.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            ServiceError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        tracing::warn!(%errors, "input rejected");
        ServiceError::Validation(errors)
    }
}

//! Budget-vs-actual aggregation per cost center.
//!
//! Pure computation over snapshots supplied by the caller; no storage
//! access happens here. Missing budgets and transactions default to zero
//! rather than erroring.

mod error;
mod service;
mod types;

pub use error::BudgetError;
pub use service::BudgetService;
pub use types::{
    BillStatus, CostCenterRef, CostCenterSummary, PlannedBudget, TotalSummary, TransactionKind,
    TransactionRecord,
};

#[cfg(test)]
#[path = "tests.rs"]
mod tests;

#[cfg(test)]
#[path = "props.rs"]
mod props;

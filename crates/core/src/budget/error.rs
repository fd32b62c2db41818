//! Budget validation errors.

use thiserror::Error;

/// Errors raised by budget validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BudgetError {
    /// Planned amount cannot be negative.
    #[error("planned amount cannot be negative")]
    NegativeAmount,
}

//! Invoice calculation errors.

use thiserror::Error;

/// Errors raised while computing invoice totals.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvoiceError {
    /// A line item failed validation.
    #[error("invalid line item: {0}")]
    InvalidLineItem(String),

    /// An invoice needs at least one line.
    #[error("an invoice requires at least one line item")]
    EmptyInvoice,
}

//! Invoice line-item totals and validation.

mod error;
mod service;
mod types;

pub use error::InvoiceError;
pub use service::InvoiceService;
pub use types::LineItem;

//! Repository abstractions for data access.
//!
//! One repository per aggregate, each with its own error enum.

pub mod budget;
pub mod contact;
pub mod cost_center;
pub mod report;
pub mod transaction;
pub mod user;

pub use budget::{BudgetError, BudgetRepository, BudgetWithLines, SetBudgetInput};
pub use contact::{ContactError, ContactRepository, CreateContactInput, UpdateContactInput};
pub use cost_center::{
    CostCenterError, CostCenterRepository, CreateCostCenterInput, UpdateCostCenterInput,
};
pub use report::{ReportError, ReportRepository};
pub use transaction::{
    CreateBillInput, CreateInvoiceInput, InvoiceLineInput, InvoiceWithLines, TransactionError,
    TransactionRepository,
};
pub use user::{CreateUserInput, UserError, UserRepository};

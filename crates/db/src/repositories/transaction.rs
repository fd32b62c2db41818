//! Transaction repository for vendor bills and customer invoices.
//!
//! Invoices are created atomically: the header amount is computed from
//! the lines before anything is inserted, and the header plus all lines
//! go in under one transaction.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use costwise_core::invoice::{InvoiceError, InvoiceService, LineItem};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{
    contacts, customer_invoices, invoice_lines,
    sea_orm_active_enums::{BillStatus, InvoiceState},
    vendor_bills,
};

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Bill not found.
    #[error("Vendor bill not found: {0}")]
    BillNotFound(Uuid),

    /// Referenced contact not found.
    #[error("Contact not found: {0}")]
    ContactNotFound(Uuid),

    /// A bill or invoice with this number already exists.
    #[error("Document number already exists: {0}")]
    DuplicateNumber(String),

    /// Amount cannot be negative.
    #[error("Amount cannot be negative")]
    NegativeAmount,

    /// Line items failed validation.
    #[error(transparent)]
    Invoice(#[from] InvoiceError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a vendor bill.
#[derive(Debug, Clone)]
pub struct CreateBillInput {
    /// Bill number, unique across bills.
    pub bill_number: String,
    /// Vendor contact.
    pub vendor_id: Uuid,
    /// Cost center the spend is attributed to.
    pub cost_center_id: Uuid,
    /// Originating purchase order, when any.
    pub purchase_order_id: Option<Uuid>,
    /// Bill amount.
    pub amount: Decimal,
    /// Initial status.
    pub status: BillStatus,
    /// Bill date.
    pub date: NaiveDate,
    /// Payment due date.
    pub due_date: Option<NaiveDate>,
}

/// One line of an invoice being created.
#[derive(Debug, Clone)]
pub struct InvoiceLineInput {
    /// Optional product reference.
    pub product_id: Option<Uuid>,
    /// Cost center the revenue is attributed to.
    pub cost_center_id: Uuid,
    /// Line description.
    pub description: String,
    /// Quantity.
    pub quantity: Decimal,
    /// Unit price.
    pub price: Decimal,
    /// Tax percentage applied to quantity times price.
    pub tax_percent: Decimal,
}

/// Input for creating a customer invoice.
#[derive(Debug, Clone)]
pub struct CreateInvoiceInput {
    /// Invoice number, unique across invoices.
    pub invoice_number: String,
    /// Customer contact.
    pub customer_id: Uuid,
    /// Invoice state.
    pub state: InvoiceState,
    /// Invoice date.
    pub invoice_date: NaiveDate,
    /// Line items; at least one is required.
    pub lines: Vec<InvoiceLineInput>,
}

/// An invoice joined with its lines and customer.
#[derive(Debug, Clone)]
pub struct InvoiceWithLines {
    /// The invoice header.
    pub invoice: customer_invoices::Model,
    /// Invoice lines, in insertion order.
    pub lines: Vec<invoice_lines::Model>,
    /// Customer contact, when it still exists.
    pub customer: Option<contacts::Model>,
}

/// Transaction repository.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: Arc<DatabaseConnection>,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Lists vendor bills with their vendors, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_bills(
        &self,
    ) -> Result<Vec<(vendor_bills::Model, Option<contacts::Model>)>, TransactionError> {
        let bills = vendor_bills::Entity::find()
            .find_also_related(contacts::Entity)
            .order_by_desc(vendor_bills::Column::Date)
            .all(&*self.db)
            .await?;

        Ok(bills)
    }

    /// Lists customer invoices with their lines and customers, newest
    /// first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_invoices(&self) -> Result<Vec<InvoiceWithLines>, TransactionError> {
        let rows = customer_invoices::Entity::find()
            .find_with_related(invoice_lines::Entity)
            .order_by_desc(customer_invoices::Column::InvoiceDate)
            .all(&*self.db)
            .await?;

        let mut out = Vec::with_capacity(rows.len());
        for (invoice, lines) in rows {
            let customer = contacts::Entity::find_by_id(invoice.customer_id)
                .one(&*self.db)
                .await?;
            out.push(InvoiceWithLines {
                invoice,
                lines,
                customer,
            });
        }

        Ok(out)
    }

    /// Creates a vendor bill.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::NegativeAmount` for negative amounts,
    /// `TransactionError::ContactNotFound` for unknown vendors, and
    /// `TransactionError::DuplicateNumber` on a taken bill number.
    pub async fn create_bill(
        &self,
        input: CreateBillInput,
    ) -> Result<vendor_bills::Model, TransactionError> {
        if input.amount < Decimal::ZERO {
            return Err(TransactionError::NegativeAmount);
        }

        contacts::Entity::find_by_id(input.vendor_id)
            .one(&*self.db)
            .await?
            .ok_or(TransactionError::ContactNotFound(input.vendor_id))?;

        let now = Utc::now().into();
        let bill = vendor_bills::ActiveModel {
            id: Set(Uuid::new_v4()),
            bill_number: Set(input.bill_number.clone()),
            vendor_id: Set(input.vendor_id),
            cost_center_id: Set(input.cost_center_id),
            purchase_order_id: Set(input.purchase_order_id),
            amount: Set(input.amount),
            status: Set(input.status),
            date: Set(input.date),
            due_date: Set(input.due_date),
            created_at: Set(now),
            updated_at: Set(now),
        };

        bill.insert(&*self.db).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                TransactionError::DuplicateNumber(input.bill_number)
            } else {
                TransactionError::Database(e)
            }
        })
    }

    /// Creates a customer invoice with its lines.
    ///
    /// The header amount is the grand total of the lines; it is computed
    /// before insertion and the whole document goes in atomically.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::Invoice` for empty or invalid lines,
    /// `TransactionError::ContactNotFound` for unknown customers, and
    /// `TransactionError::DuplicateNumber` on a taken invoice number.
    pub async fn create_invoice(
        &self,
        input: CreateInvoiceInput,
    ) -> Result<InvoiceWithLines, TransactionError> {
        let items: Vec<LineItem> = input
            .lines
            .iter()
            .map(|line| LineItem::new(line.quantity, line.price, line.tax_percent))
            .collect();
        let amount = InvoiceService::grand_total(&items)?;

        let customer = contacts::Entity::find_by_id(input.customer_id)
            .one(&*self.db)
            .await?
            .ok_or(TransactionError::ContactNotFound(input.customer_id))?;

        let txn = self.db.begin().await?;

        let now = Utc::now().into();
        let invoice = customer_invoices::ActiveModel {
            id: Set(Uuid::new_v4()),
            invoice_number: Set(input.invoice_number.clone()),
            customer_id: Set(input.customer_id),
            state: Set(input.state),
            invoice_date: Set(input.invoice_date),
            amount: Set(amount),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let invoice = invoice.insert(&txn).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                TransactionError::DuplicateNumber(input.invoice_number)
            } else {
                TransactionError::Database(e)
            }
        })?;

        let mut inserted = Vec::with_capacity(input.lines.len());
        for line in input.lines {
            let row = invoice_lines::ActiveModel {
                id: Set(Uuid::new_v4()),
                invoice_id: Set(invoice.id),
                product_id: Set(line.product_id),
                cost_center_id: Set(line.cost_center_id),
                description: Set(line.description),
                quantity: Set(line.quantity),
                price: Set(line.price),
                tax_percent: Set(line.tax_percent),
                created_at: Set(now),
                updated_at: Set(now),
            };
            inserted.push(row.insert(&txn).await?);
        }

        txn.commit().await?;

        Ok(InvoiceWithLines {
            invoice,
            lines: inserted,
            customer: Some(customer),
        })
    }

    /// Updates a vendor bill's status.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::BillNotFound` if no such bill exists.
    pub async fn update_bill_status(
        &self,
        id: Uuid,
        status: BillStatus,
    ) -> Result<vendor_bills::Model, TransactionError> {
        let bill = vendor_bills::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or(TransactionError::BillNotFound(id))?;

        let mut active: vendor_bills::ActiveModel = bill.into();
        active.status = Set(status);
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&*self.db).await?)
    }
}

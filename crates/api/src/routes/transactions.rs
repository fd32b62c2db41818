//! Transaction routes for vendor bills and customer invoices.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser, middleware::require_admin};
use costwise_core::invoice::InvoiceError;
use costwise_db::{
    entities::sea_orm_active_enums::{BillStatus, InvoiceState},
    repositories::transaction::{
        CreateBillInput, CreateInvoiceInput, InvoiceLineInput, InvoiceWithLines, TransactionError,
        TransactionRepository,
    },
};

/// Creates the transaction routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions))
        .route("/transactions/bills", post(create_bill))
        .route("/transactions/invoices", post(create_invoice))
        .route("/transactions/bills/{id}/status", patch(update_bill_status))
}

/// Request body for creating a vendor bill.
#[derive(Debug, Deserialize)]
pub struct CreateBillRequest {
    /// Bill number, unique across bills.
    pub bill_number: String,
    /// Vendor contact ID.
    pub vendor_id: Uuid,
    /// Cost center the spend is attributed to.
    pub cost_center_id: Uuid,
    /// Originating purchase order.
    pub purchase_order_id: Option<Uuid>,
    /// Bill amount.
    pub amount: Decimal,
    /// Status: draft, approved, paid, rejected. Defaults to draft.
    pub status: Option<String>,
    /// Bill date.
    pub date: NaiveDate,
    /// Payment due date.
    pub due_date: Option<NaiveDate>,
}

/// One invoice line in a create request.
#[derive(Debug, Deserialize)]
pub struct InvoiceLineRequest {
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
    /// Tax percentage.
    pub tax_percent: Decimal,
}

/// Request body for creating a customer invoice.
#[derive(Debug, Deserialize)]
pub struct CreateInvoiceRequest {
    /// Invoice number, unique across invoices.
    pub invoice_number: String,
    /// Customer contact ID.
    pub customer_id: Uuid,
    /// State: draft, open, paid. Defaults to open.
    pub state: Option<String>,
    /// Invoice date.
    pub invoice_date: NaiveDate,
    /// Line items; at least one is required.
    pub lines: Vec<InvoiceLineRequest>,
}

/// Request body for updating a bill's status.
#[derive(Debug, Deserialize)]
pub struct UpdateBillStatusRequest {
    /// New status: draft, approved, paid, rejected.
    pub status: String,
}

/// Converts a bill status string to the stored enum.
fn parse_bill_status(s: &str) -> Option<BillStatus> {
    match s {
        "draft" => Some(BillStatus::Draft),
        "approved" => Some(BillStatus::Approved),
        "paid" => Some(BillStatus::Paid),
        "rejected" => Some(BillStatus::Rejected),
        _ => None,
    }
}

/// Converts an invoice state string to the stored enum.
fn parse_invoice_state(s: &str) -> Option<InvoiceState> {
    match s {
        "draft" => Some(InvoiceState::Draft),
        "open" => Some(InvoiceState::Open),
        "paid" => Some(InvoiceState::Paid),
        _ => None,
    }
}

fn invoice_json(inv: &InvoiceWithLines) -> serde_json::Value {
    let lines: Vec<serde_json::Value> = inv
        .lines
        .iter()
        .map(|l| {
            json!({
                "id": l.id,
                "product_id": l.product_id,
                "cost_center_id": l.cost_center_id,
                "description": l.description,
                "quantity": l.quantity,
                "price": l.price,
                "tax_percent": l.tax_percent
            })
        })
        .collect();

    json!({
        "id": inv.invoice.id,
        "invoice_number": inv.invoice.invoice_number,
        "customer_id": inv.invoice.customer_id,
        "customer_name": inv.customer.as_ref().map(|c| c.name.clone()),
        "state": inv.invoice.state,
        "invoice_date": inv.invoice.invoice_date,
        "amount": inv.invoice.amount,
        "lines": lines
    })
}

/// GET /transactions - List bills and invoices.
async fn list_transactions(State(state): State<AppState>, _auth: AuthUser) -> impl IntoResponse {
    let repo = TransactionRepository::new(state.db.clone());

    let bills = match repo.list_bills().await {
        Ok(b) => b,
        Err(e) => {
            error!(error = %e, "Failed to list bills");
            return map_transaction_error(&e);
        }
    };

    let invoices = match repo.list_invoices().await {
        Ok(i) => i,
        Err(e) => {
            error!(error = %e, "Failed to list invoices");
            return map_transaction_error(&e);
        }
    };

    let bill_rows: Vec<serde_json::Value> = bills
        .iter()
        .map(|(bill, vendor)| {
            json!({
                "id": bill.id,
                "bill_number": bill.bill_number,
                "vendor_id": bill.vendor_id,
                "vendor_name": vendor.as_ref().map(|v| v.name.clone()),
                "cost_center_id": bill.cost_center_id,
                "purchase_order_id": bill.purchase_order_id,
                "amount": bill.amount,
                "status": bill.status,
                "date": bill.date,
                "due_date": bill.due_date
            })
        })
        .collect();

    let invoice_rows: Vec<serde_json::Value> = invoices.iter().map(invoice_json).collect();

    (
        StatusCode::OK,
        Json(json!({ "bills": bill_rows, "invoices": invoice_rows })),
    )
        .into_response()
}

/// POST /transactions/bills - Record a vendor bill.
async fn create_bill(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateBillRequest>,
) -> impl IntoResponse {
    if let Err(response) = require_admin(&auth) {
        return response;
    }

    let status = match payload.status.as_deref() {
        None => BillStatus::Draft,
        Some(s) => match parse_bill_status(s) {
            Some(status) => status,
            None => return invalid_status_response(),
        },
    };

    let repo = TransactionRepository::new(state.db.clone());
    let input = CreateBillInput {
        bill_number: payload.bill_number,
        vendor_id: payload.vendor_id,
        cost_center_id: payload.cost_center_id,
        purchase_order_id: payload.purchase_order_id,
        amount: payload.amount,
        status,
        date: payload.date,
        due_date: payload.due_date,
    };

    match repo.create_bill(input).await {
        Ok(bill) => {
            info!(bill_id = %bill.id, bill_number = %bill.bill_number, "Vendor bill created");
            (
                StatusCode::CREATED,
                Json(json!({
                    "id": bill.id,
                    "bill_number": bill.bill_number,
                    "vendor_id": bill.vendor_id,
                    "cost_center_id": bill.cost_center_id,
                    "amount": bill.amount,
                    "status": bill.status,
                    "date": bill.date,
                    "due_date": bill.due_date
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create bill");
            map_transaction_error(&e)
        }
    }
}

/// POST /transactions/invoices - Record a customer invoice.
///
/// The invoice amount is computed from the lines server-side.
async fn create_invoice(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateInvoiceRequest>,
) -> impl IntoResponse {
    if let Err(response) = require_admin(&auth) {
        return response;
    }

    let invoice_state = match payload.state.as_deref() {
        None => InvoiceState::Open,
        Some(s) => match parse_invoice_state(s) {
            Some(state) => state,
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "invalid_state",
                        "message": "State must be one of: draft, open, paid"
                    })),
                )
                    .into_response();
            }
        },
    };

    let repo = TransactionRepository::new(state.db.clone());
    let input = CreateInvoiceInput {
        invoice_number: payload.invoice_number,
        customer_id: payload.customer_id,
        state: invoice_state,
        invoice_date: payload.invoice_date,
        lines: payload
            .lines
            .into_iter()
            .map(|l| InvoiceLineInput {
                product_id: l.product_id,
                cost_center_id: l.cost_center_id,
                description: l.description,
                quantity: l.quantity,
                price: l.price,
                tax_percent: l.tax_percent,
            })
            .collect(),
    };

    match repo.create_invoice(input).await {
        Ok(invoice) => {
            info!(
                invoice_id = %invoice.invoice.id,
                invoice_number = %invoice.invoice.invoice_number,
                amount = %invoice.invoice.amount,
                "Customer invoice created"
            );
            (StatusCode::CREATED, Json(invoice_json(&invoice))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create invoice");
            map_transaction_error(&e)
        }
    }
}

/// PATCH /transactions/bills/{id}/status - Move a bill through its lifecycle.
async fn update_bill_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBillStatusRequest>,
) -> impl IntoResponse {
    if let Err(response) = require_admin(&auth) {
        return response;
    }

    let Some(status) = parse_bill_status(&payload.status) else {
        return invalid_status_response();
    };

    let repo = TransactionRepository::new(state.db.clone());

    match repo.update_bill_status(id, status).await {
        Ok(bill) => {
            info!(bill_id = %bill.id, status = ?bill.status, "Bill status updated");
            (
                StatusCode::OK,
                Json(json!({
                    "id": bill.id,
                    "bill_number": bill.bill_number,
                    "status": bill.status
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to update bill status");
            map_transaction_error(&e)
        }
    }
}

fn invalid_status_response() -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "invalid_status",
            "message": "Status must be one of: draft, approved, paid, rejected"
        })),
    )
        .into_response()
}

/// Maps transaction errors to HTTP responses.
fn map_transaction_error(e: &TransactionError) -> axum::response::Response {
    match e {
        TransactionError::BillNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("Vendor bill not found: {id}")
            })),
        )
            .into_response(),
        TransactionError::ContactNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("Contact not found: {id}")
            })),
        )
            .into_response(),
        TransactionError::DuplicateNumber(number) => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "duplicate_number",
                "message": format!("Document number already exists: {number}")
            })),
        )
            .into_response(),
        TransactionError::NegativeAmount => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "negative_amount",
                "message": "Amount cannot be negative"
            })),
        )
            .into_response(),
        TransactionError::Invoice(InvoiceError::EmptyInvoice) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "empty_invoice",
                "message": "An invoice requires at least one line"
            })),
        )
            .into_response(),
        TransactionError::Invoice(InvoiceError::InvalidLineItem(reason)) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_line_item",
                "message": reason
            })),
        )
            .into_response(),
        TransactionError::Database(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "internal_error",
                "message": "An error occurred"
            })),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("draft", Some(BillStatus::Draft))]
    #[case("approved", Some(BillStatus::Approved))]
    #[case("paid", Some(BillStatus::Paid))]
    #[case("rejected", Some(BillStatus::Rejected))]
    #[case("cancelled", None)]
    fn test_parse_bill_status(#[case] input: &str, #[case] expected: Option<BillStatus>) {
        assert_eq!(parse_bill_status(input), expected);
    }

    #[rstest]
    #[case("draft", Some(InvoiceState::Draft))]
    #[case("open", Some(InvoiceState::Open))]
    #[case("paid", Some(InvoiceState::Paid))]
    #[case("void", None)]
    fn test_parse_invoice_state(#[case] input: &str, #[case] expected: Option<InvoiceState>) {
        assert_eq!(parse_invoice_state(input), expected);
    }
}

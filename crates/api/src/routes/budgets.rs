//! Budget management routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser, middleware::require_admin};
use costwise_db::repositories::budget::{
    BudgetError, BudgetRepository, BudgetWithLines, SetBudgetInput,
};

/// Creates the budget routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budgets", get(list_budgets))
        .route("/budgets", post(set_budget))
}

/// Query parameters for listing budgets.
#[derive(Debug, Deserialize)]
pub struct ListBudgetsQuery {
    /// Restrict to one fiscal year.
    pub fiscal_year: Option<i32>,
}

/// Request body for setting a budget.
#[derive(Debug, Deserialize)]
pub struct SetBudgetRequest {
    /// Cost center the budget belongs to.
    pub cost_center_id: Uuid,
    /// Calendar fiscal year.
    pub fiscal_year: i32,
    /// Planned amount for the year.
    pub planned_amount: Decimal,
}

fn budget_json(b: &BudgetWithLines) -> serde_json::Value {
    json!({
        "id": b.budget.id,
        "name": b.budget.name,
        "cost_center_id": b.budget.cost_center_id,
        "cost_center": b.cost_center.as_ref().map(|cc| json!({
            "id": cc.id,
            "name": cc.name,
            "code": cc.code
        })),
        "fiscal_year": b.budget.fiscal_year,
        "date_from": b.budget.date_from,
        "date_to": b.budget.date_to,
        "planned_amount": b.planned_amount(),
        "created_at": b.budget.created_at,
        "updated_at": b.budget.updated_at
    })
}

/// GET /budgets - List budgets with their planned amounts.
async fn list_budgets(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListBudgetsQuery>,
) -> impl IntoResponse {
    let repo = BudgetRepository::new(state.db.clone());

    match repo.list(query.fiscal_year).await {
        Ok(budgets) => {
            let rows: Vec<serde_json::Value> = budgets.iter().map(budget_json).collect();
            (StatusCode::OK, Json(json!({ "budgets": rows }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list budgets");
            map_budget_error(&e)
        }
    }
}

/// POST /budgets - Create or replace the budget for a cost center and
/// fiscal year.
async fn set_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<SetBudgetRequest>,
) -> impl IntoResponse {
    if let Err(response) = require_admin(&auth) {
        return response;
    }

    let repo = BudgetRepository::new(state.db.clone());
    let input = SetBudgetInput {
        cost_center_id: payload.cost_center_id,
        fiscal_year: payload.fiscal_year,
        planned_amount: payload.planned_amount,
    };

    match repo.set_budget(input).await {
        Ok(budget) => {
            info!(
                budget_id = %budget.budget.id,
                cost_center_id = %budget.budget.cost_center_id,
                fiscal_year = budget.budget.fiscal_year,
                "Budget set"
            );
            (StatusCode::OK, Json(budget_json(&budget))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to set budget");
            map_budget_error(&e)
        }
    }
}

/// Maps budget errors to HTTP responses.
fn map_budget_error(e: &BudgetError) -> axum::response::Response {
    match e {
        BudgetError::CostCenterNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("Cost center not found: {id}")
            })),
        )
            .into_response(),
        BudgetError::NegativeAmount => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "negative_amount",
                "message": "Planned amount cannot be negative"
            })),
        )
            .into_response(),
        BudgetError::InvalidFiscalYear(year) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_fiscal_year",
                "message": format!("Invalid fiscal year: {year}")
            })),
        )
            .into_response(),
        BudgetError::ConcurrentUpsert => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "concurrent_update",
                "message": "Budget was created concurrently; retry the request"
            })),
        )
            .into_response(),
        BudgetError::Database(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "internal_error",
                "message": "An error occurred"
            })),
        )
            .into_response(),
    }
}

//! Reporting routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::{AppState, middleware::AuthUser};
use costwise_db::repositories::report::{ReportError, ReportRepository};

/// Creates the report routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/reports/budget-summary", get(budget_summary))
}

/// Query parameters for the budget summary report.
#[derive(Debug, Deserialize)]
pub struct BudgetSummaryQuery {
    /// Fiscal year to report on. Defaults to the current year.
    pub fiscal_year: Option<i32>,
}

/// GET /reports/budget-summary - Budget vs actual per cost center.
async fn budget_summary(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<BudgetSummaryQuery>,
) -> impl IntoResponse {
    let fiscal_year = query.fiscal_year.unwrap_or_else(|| Utc::now().year());

    let repo = ReportRepository::new(state.db.clone());

    match repo.budget_summary(fiscal_year).await {
        Ok(report) => {
            let rows: Vec<serde_json::Value> = report
                .summaries
                .iter()
                .map(|s| {
                    json!({
                        "cost_center": {
                            "id": s.cost_center.id,
                            "name": s.cost_center.name,
                            "code": s.cost_center.code
                        },
                        "budget": s.budget,
                        "spent": s.spent,
                        "revenue": s.revenue,
                        "remaining": s.remaining,
                        "variance": s.variance,
                        "percent_used": s.percent_used
                    })
                })
                .collect();

            (
                StatusCode::OK,
                Json(json!({
                    "fiscal_year": report.fiscal_year,
                    "cost_centers": rows,
                    "totals": {
                        "total_budget": report.totals.total_budget,
                        "total_spent": report.totals.total_spent,
                        "total_revenue": report.totals.total_revenue,
                        "total_remaining": report.totals.total_remaining
                    }
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, fiscal_year, "Failed to build budget summary");
            map_report_error(&e)
        }
    }
}

/// Maps report errors to HTTP responses.
fn map_report_error(e: &ReportError) -> axum::response::Response {
    match e {
        ReportError::Invoice(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": "invalid_stored_data",
                "message": "A stored invoice line is invalid"
            })),
        )
            .into_response(),
        ReportError::Database(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "internal_error",
                "message": "An error occurred"
            })),
        )
            .into_response(),
    }
}

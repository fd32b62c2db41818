//! Cost center management routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser, middleware::require_admin};
use costwise_db::{
    entities::{cost_centers, sea_orm_active_enums::CostCenterStatus},
    repositories::cost_center::{
        CostCenterError, CostCenterRepository, CreateCostCenterInput, UpdateCostCenterInput,
    },
};

/// Creates the cost center routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cost-centers", get(list_cost_centers))
        .route("/cost-centers", post(create_cost_center))
        .route("/cost-centers/{id}", put(update_cost_center))
        .route("/cost-centers/{id}", delete(deactivate_cost_center))
}

/// Request body for creating a cost center.
#[derive(Debug, Deserialize)]
pub struct CreateCostCenterRequest {
    /// Cost center name.
    pub name: String,
    /// Unique code (e.g., "MKT").
    pub code: String,
    /// Status: pending, active, rejected. Defaults to active.
    pub status: Option<String>,
}

/// Request body for updating a cost center.
#[derive(Debug, Deserialize)]
pub struct UpdateCostCenterRequest {
    /// New name.
    pub name: Option<String>,
    /// New code.
    pub code: Option<String>,
    /// New status: pending, active, rejected.
    pub status: Option<String>,
    /// New active flag.
    pub active: Option<bool>,
}

/// Converts a status string to the stored enum.
fn parse_status(s: &str) -> Option<CostCenterStatus> {
    match s {
        "pending" => Some(CostCenterStatus::Pending),
        "active" => Some(CostCenterStatus::Active),
        "rejected" => Some(CostCenterStatus::Rejected),
        _ => None,
    }
}

fn cost_center_json(cc: &cost_centers::Model) -> serde_json::Value {
    json!({
        "id": cc.id,
        "name": cc.name,
        "code": cc.code,
        "status": cc.status,
        "active": cc.active,
        "created_at": cc.created_at,
        "updated_at": cc.updated_at
    })
}

/// GET /cost-centers - List active cost centers.
async fn list_cost_centers(State(state): State<AppState>, _auth: AuthUser) -> impl IntoResponse {
    let repo = CostCenterRepository::new(state.db.clone());

    match repo.list_active().await {
        Ok(centers) => {
            let rows: Vec<serde_json::Value> = centers.iter().map(cost_center_json).collect();
            (StatusCode::OK, Json(json!({ "cost_centers": rows }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list cost centers");
            map_cost_center_error(&e)
        }
    }
}

/// POST /cost-centers - Create a cost center.
///
/// Reuses an inactive row with the same code instead of failing on it.
async fn create_cost_center(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateCostCenterRequest>,
) -> impl IntoResponse {
    if let Err(response) = require_admin(&auth) {
        return response;
    }

    if payload.name.trim().is_empty() || payload.code.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "validation_error",
                "message": "Name and code are required"
            })),
        )
            .into_response();
    }

    let status = match payload.status.as_deref() {
        None => CostCenterStatus::Active,
        Some(s) => match parse_status(s) {
            Some(status) => status,
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "invalid_status",
                        "message": "Status must be one of: pending, active, rejected"
                    })),
                )
                    .into_response();
            }
        },
    };

    let repo = CostCenterRepository::new(state.db.clone());
    let input = CreateCostCenterInput {
        name: payload.name,
        code: payload.code,
        status,
    };

    match repo.create_or_reactivate(input).await {
        Ok(cc) => {
            info!(cost_center_id = %cc.id, code = %cc.code, "Cost center created");
            (StatusCode::CREATED, Json(cost_center_json(&cc))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create cost center");
            map_cost_center_error(&e)
        }
    }
}

/// PUT /cost-centers/{id} - Update a cost center.
async fn update_cost_center(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCostCenterRequest>,
) -> impl IntoResponse {
    if let Err(response) = require_admin(&auth) {
        return response;
    }

    let status = match payload.status.as_deref() {
        None => None,
        Some(s) => match parse_status(s) {
            Some(status) => Some(status),
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "invalid_status",
                        "message": "Status must be one of: pending, active, rejected"
                    })),
                )
                    .into_response();
            }
        },
    };

    let repo = CostCenterRepository::new(state.db.clone());
    let input = UpdateCostCenterInput {
        name: payload.name,
        code: payload.code,
        status,
        active: payload.active,
    };

    match repo.update(id, input).await {
        Ok(cc) => {
            info!(cost_center_id = %cc.id, "Cost center updated");
            (StatusCode::OK, Json(cost_center_json(&cc))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to update cost center");
            map_cost_center_error(&e)
        }
    }
}

/// DELETE /cost-centers/{id} - Soft-delete a cost center.
async fn deactivate_cost_center(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = require_admin(&auth) {
        return response;
    }

    let repo = CostCenterRepository::new(state.db.clone());

    match repo.deactivate(id).await {
        Ok(()) => {
            info!(cost_center_id = %id, "Cost center deactivated");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to deactivate cost center");
            map_cost_center_error(&e)
        }
    }
}

/// Maps cost center errors to HTTP responses.
fn map_cost_center_error(e: &CostCenterError) -> axum::response::Response {
    match e {
        CostCenterError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("Cost center not found: {id}")
            })),
        )
            .into_response(),
        CostCenterError::Database(_) => (
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

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status("active"), Some(CostCenterStatus::Active));
        assert_eq!(parse_status("pending"), Some(CostCenterStatus::Pending));
        assert_eq!(parse_status("rejected"), Some(CostCenterStatus::Rejected));
        assert_eq!(parse_status("archived"), None);
    }
}

//! Contact management routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
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
    entities::{contacts, sea_orm_active_enums::ContactType},
    repositories::contact::{
        ContactError, ContactRepository, CreateContactInput, UpdateContactInput,
    },
};

/// Creates the contact routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/contacts", get(list_contacts))
        .route("/contacts", post(create_contact))
        .route("/contacts/{id}", put(update_contact))
        .route("/contacts/{id}", delete(archive_contact))
}

/// Query parameters for listing contacts.
#[derive(Debug, Deserialize)]
pub struct ListContactsQuery {
    /// Restrict to one type: vendor, customer, all.
    #[serde(rename = "type")]
    pub contact_type: Option<String>,
}

/// Request body for creating a contact.
#[derive(Debug, Deserialize)]
pub struct CreateContactRequest {
    /// Contact name.
    pub name: String,
    /// Contact email, unique across contacts.
    pub email: String,
    /// Type: vendor, customer, all.
    pub contact_type: String,
    /// Phone number.
    pub phone: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State or province.
    pub state: Option<String>,
    /// Country.
    pub country: Option<String>,
    /// Postal code.
    pub pincode: Option<String>,
}

/// Request body for updating a contact.
#[derive(Debug, Deserialize)]
pub struct UpdateContactRequest {
    /// New name.
    pub name: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New type: vendor, customer, all.
    pub contact_type: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New city.
    pub city: Option<String>,
    /// New state or province.
    pub state: Option<String>,
    /// New country.
    pub country: Option<String>,
    /// New postal code.
    pub pincode: Option<String>,
}

/// Converts a type string to the stored enum.
fn parse_contact_type(s: &str) -> Option<ContactType> {
    match s {
        "vendor" => Some(ContactType::Vendor),
        "customer" => Some(ContactType::Customer),
        "all" => Some(ContactType::All),
        _ => None,
    }
}

fn contact_json(c: &contacts::Model) -> serde_json::Value {
    json!({
        "id": c.id,
        "name": c.name,
        "email": c.email,
        "contact_type": c.contact_type,
        "phone": c.phone,
        "city": c.city,
        "state": c.state,
        "country": c.country,
        "pincode": c.pincode,
        "active": c.active
    })
}

fn invalid_type_response() -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "invalid_contact_type",
            "message": "Contact type must be one of: vendor, customer, all"
        })),
    )
        .into_response()
}

/// GET /contacts - List active contacts, optionally filtered by type.
async fn list_contacts(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListContactsQuery>,
) -> impl IntoResponse {
    let wanted = match query.contact_type.as_deref() {
        None => None,
        Some(s) => match parse_contact_type(s) {
            Some(ct) => Some(ct),
            None => return invalid_type_response(),
        },
    };

    let repo = ContactRepository::new(state.db.clone());

    match repo.list_active(wanted).await {
        Ok(rows) => {
            let contacts: Vec<serde_json::Value> = rows.iter().map(contact_json).collect();
            (StatusCode::OK, Json(json!({ "contacts": contacts }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list contacts");
            map_contact_error(&e)
        }
    }
}

/// POST /contacts - Create a contact.
async fn create_contact(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateContactRequest>,
) -> impl IntoResponse {
    if let Err(response) = require_admin(&auth) {
        return response;
    }

    let Some(contact_type) = parse_contact_type(&payload.contact_type) else {
        return invalid_type_response();
    };

    if payload.name.trim().is_empty() || payload.email.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "validation_error",
                "message": "Name and email are required"
            })),
        )
            .into_response();
    }

    let repo = ContactRepository::new(state.db.clone());
    let input = CreateContactInput {
        name: payload.name,
        email: payload.email,
        contact_type,
        phone: payload.phone,
        city: payload.city,
        state: payload.state,
        country: payload.country,
        pincode: payload.pincode,
    };

    match repo.create(input).await {
        Ok(contact) => {
            info!(contact_id = %contact.id, "Contact created");
            (StatusCode::CREATED, Json(contact_json(&contact))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create contact");
            map_contact_error(&e)
        }
    }
}

/// PUT /contacts/{id} - Update a contact.
async fn update_contact(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateContactRequest>,
) -> impl IntoResponse {
    if let Err(response) = require_admin(&auth) {
        return response;
    }

    let contact_type = match payload.contact_type.as_deref() {
        None => None,
        Some(s) => match parse_contact_type(s) {
            Some(ct) => Some(ct),
            None => return invalid_type_response(),
        },
    };

    let repo = ContactRepository::new(state.db.clone());
    let input = UpdateContactInput {
        name: payload.name,
        email: payload.email,
        contact_type,
        phone: payload.phone,
        city: payload.city,
        state: payload.state,
        country: payload.country,
        pincode: payload.pincode,
    };

    match repo.update(id, input).await {
        Ok(contact) => {
            info!(contact_id = %contact.id, "Contact updated");
            (StatusCode::OK, Json(contact_json(&contact))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to update contact");
            map_contact_error(&e)
        }
    }
}

/// DELETE /contacts/{id} - Archive a contact.
async fn archive_contact(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = require_admin(&auth) {
        return response;
    }

    let repo = ContactRepository::new(state.db.clone());

    match repo.archive(id).await {
        Ok(()) => {
            info!(contact_id = %id, "Contact archived");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to archive contact");
            map_contact_error(&e)
        }
    }
}

/// Maps contact errors to HTTP responses.
fn map_contact_error(e: &ContactError) -> axum::response::Response {
    match e {
        ContactError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("Contact not found: {id}")
            })),
        )
            .into_response(),
        ContactError::DuplicateEmail(email) => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "duplicate_email",
                "message": format!("A contact with email {email} already exists")
            })),
        )
            .into_response(),
        ContactError::Database(_) => (
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
    fn test_parse_contact_type() {
        assert_eq!(parse_contact_type("vendor"), Some(ContactType::Vendor));
        assert_eq!(parse_contact_type("customer"), Some(ContactType::Customer));
        assert_eq!(parse_contact_type("all"), Some(ContactType::All));
        assert_eq!(parse_contact_type("supplier"), None);
    }
}

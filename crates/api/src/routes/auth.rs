//! Authentication routes for signup, login, and the current user.

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get,
    routing::post,
};
use serde_json::json;
use tracing::{error, info};

use crate::{AppState, middleware::AuthUser};
use costwise_core::auth::{hash_password, verify_password};
use costwise_db::{
    UserRepository,
    entities::sea_orm_active_enums::UserRole,
    repositories::user::{CreateUserInput, UserError},
};
use costwise_shared::auth::{LoginRequest, SignupRequest, TokenPair};

/// Creates the public auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
}

/// Creates the auth routes that sit behind the auth middleware.
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/auth/me", get(me))
}

/// Converts a role string to the stored enum, defaulting to portal.
fn parse_role(role: Option<&str>) -> Option<UserRole> {
    match role {
        None => Some(UserRole::Portal),
        Some("portal") => Some(UserRole::Portal),
        Some("admin") => Some(UserRole::Admin),
        Some(_) => None,
    }
}

/// POST /auth/signup - Register a new user.
async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> impl IntoResponse {
    if payload.password.len() < 8 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "weak_password",
                "message": "Password must be at least 8 characters"
            })),
        )
            .into_response();
    }

    let Some(role) = parse_role(payload.role.as_deref()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_role",
                "message": "Role must be one of: admin, portal"
            })),
        )
            .into_response();
    };

    let password_hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "Failed to hash password");
            return internal_error();
        }
    };

    let user_repo = UserRepository::new(state.db.clone());
    let input = CreateUserInput {
        name: payload.name,
        email: payload.email,
        login: payload.login,
        password_hash,
        role,
    };

    match user_repo.create(input).await {
        Ok(user) => {
            info!(user_id = %user.id, "User registered");
            (
                StatusCode::CREATED,
                Json(json!({
                    "id": user.id,
                    "name": user.name,
                    "email": user.email,
                    "login": user.login,
                    "role": user.role.as_str()
                })),
            )
                .into_response()
        }
        Err(UserError::DuplicateEmail) => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "duplicate_email",
                "message": "A user with this email already exists"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to create user");
            internal_error()
        }
    }
}

/// POST /auth/login - Authenticate and return an access token.
///
/// The identifier in the email field may also be a login name.
async fn login(State(state): State<AppState>, Json(payload): Json<LoginRequest>) -> impl IntoResponse {
    let user_repo = UserRepository::new(state.db.clone());

    let user = match user_repo.find_by_email_or_login(&payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            info!(identifier = %payload.email, "Login attempt for non-existent user");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Database error during login");
            return internal_error();
        }
    };

    if !user.active {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "account_disabled",
                "message": "This account has been disabled"
            })),
        )
            .into_response();
    }

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(user_id = %user.id, "Failed login attempt");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Password verification error");
            return internal_error();
        }
    }

    let access_token = match state
        .jwt_service
        .generate_access_token(user.id, user.role.as_str())
    {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate access token");
            return internal_error();
        }
    };

    info!(user_id = %user.id, "User logged in");

    let tokens = TokenPair::new(access_token, state.jwt_service.access_token_expires_in());
    (
        StatusCode::OK,
        Json(json!({
            "user": {
                "id": user.id,
                "name": user.name,
                "email": user.email,
                "login": user.login,
                "role": user.role.as_str()
            },
            "access_token": tokens.access_token,
            "expires_in": tokens.expires_in
        })),
    )
        .into_response()
}

/// GET /auth/me - Return the authenticated user.
async fn me(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let user_repo = UserRepository::new(state.db.clone());

    match user_repo.find_by_id(auth.user_id()).await {
        Ok(user) => (
            StatusCode::OK,
            Json(json!({
                "id": user.id,
                "name": user.name,
                "email": user.email,
                "login": user.login,
                "role": user.role.as_str(),
                "active": user.active
            })),
        )
            .into_response(),
        Err(UserError::NotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": "User no longer exists"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to load user");
            internal_error()
        }
    }
}

fn invalid_credentials() -> axum::response::Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "invalid_credentials",
            "message": "Invalid email or password"
        })),
    )
        .into_response()
}

fn internal_error() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": "An error occurred"
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role_defaults_to_portal() {
        assert_eq!(parse_role(None), Some(UserRole::Portal));
        assert_eq!(parse_role(Some("portal")), Some(UserRole::Portal));
        assert_eq!(parse_role(Some("admin")), Some(UserRole::Admin));
        assert_eq!(parse_role(Some("owner")), None);
    }
}

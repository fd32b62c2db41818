//! User repository for authentication lookups.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    Set,
};
use uuid::Uuid;

use crate::entities::{sea_orm_active_enums::UserRole, users};

/// Error types for user operations.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// User not found.
    #[error("User not found: {0}")]
    NotFound(Uuid),

    /// Email already registered.
    #[error("Email already registered")]
    DuplicateEmail,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a user.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    /// Display name.
    pub name: String,
    /// Email address (unique).
    pub email: String,
    /// Login name; defaults to the email when absent.
    pub login: Option<String>,
    /// Argon2id password hash.
    pub password_hash: String,
    /// User role.
    pub role: UserRole,
}

/// User repository.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: Arc<DatabaseConnection>,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns `UserError::DuplicateEmail` if the email is taken.
    pub async fn create(&self, input: CreateUserInput) -> Result<users::Model, UserError> {
        let existing = users::Entity::find()
            .filter(users::Column::Email.eq(&input.email))
            .one(&*self.db)
            .await?;

        if existing.is_some() {
            return Err(UserError::DuplicateEmail);
        }

        let now = Utc::now().into();
        let login = input.login.unwrap_or_else(|| input.email.clone());

        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            email: Set(input.email),
            login: Set(login),
            password_hash: Set(input.password_hash),
            role: Set(input.role),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(user.insert(&*self.db).await?)
    }

    /// Finds a user by email or login name (login form accepts either).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email_or_login(
        &self,
        identifier: &str,
    ) -> Result<Option<users::Model>, UserError> {
        let user = users::Entity::find()
            .filter(
                Condition::any()
                    .add(users::Column::Email.eq(identifier))
                    .add(users::Column::Login.eq(identifier)),
            )
            .one(&*self.db)
            .await?;

        Ok(user)
    }

    /// Gets a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `UserError::NotFound` if no such user exists.
    pub async fn find_by_id(&self, user_id: Uuid) -> Result<users::Model, UserError> {
        users::Entity::find_by_id(user_id)
            .one(&*self.db)
            .await?
            .ok_or(UserError::NotFound(user_id))
    }
}

//! Cost center repository.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use crate::entities::{cost_centers, sea_orm_active_enums::CostCenterStatus};

/// Error types for cost center operations.
#[derive(Debug, thiserror::Error)]
pub enum CostCenterError {
    /// Cost center not found.
    #[error("Cost center not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a cost center.
#[derive(Debug, Clone)]
pub struct CreateCostCenterInput {
    /// Cost center name.
    pub name: String,
    /// Unique code (e.g., "MKT").
    pub code: String,
    /// Initial status; defaults to active when created by an admin.
    pub status: CostCenterStatus,
}

/// Input for updating a cost center.
#[derive(Debug, Clone, Default)]
pub struct UpdateCostCenterInput {
    /// New name.
    pub name: Option<String>,
    /// New code.
    pub code: Option<String>,
    /// New status.
    pub status: Option<CostCenterStatus>,
    /// New active flag.
    pub active: Option<bool>,
}

/// Cost center repository.
#[derive(Debug, Clone)]
pub struct CostCenterRepository {
    db: Arc<DatabaseConnection>,
}

impl CostCenterRepository {
    /// Creates a new cost center repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Lists active cost centers ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_active(&self) -> Result<Vec<cost_centers::Model>, CostCenterError> {
        let centers = cost_centers::Entity::find()
            .filter(cost_centers::Column::Active.eq(true))
            .order_by_asc(cost_centers::Column::Name)
            .all(&*self.db)
            .await?;

        Ok(centers)
    }

    /// Creates a cost center, or reactivates and renames an existing one
    /// with the same code instead of failing on the unique constraint.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create_or_reactivate(
        &self,
        input: CreateCostCenterInput,
    ) -> Result<cost_centers::Model, CostCenterError> {
        let existing = cost_centers::Entity::find()
            .filter(cost_centers::Column::Code.eq(&input.code))
            .one(&*self.db)
            .await?;

        if let Some(cc) = existing {
            let mut active: cost_centers::ActiveModel = cc.into();
            active.name = Set(input.name);
            active.active = Set(true);
            active.updated_at = Set(Utc::now().into());
            return Ok(active.update(&*self.db).await?);
        }

        let now = Utc::now().into();
        let cc = cost_centers::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            code: Set(input.code),
            status: Set(input.status),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(cc.insert(&*self.db).await?)
    }

    /// Updates a cost center.
    ///
    /// # Errors
    ///
    /// Returns `CostCenterError::NotFound` if no such cost center exists.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateCostCenterInput,
    ) -> Result<cost_centers::Model, CostCenterError> {
        let cc = cost_centers::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or(CostCenterError::NotFound(id))?;

        let mut active: cost_centers::ActiveModel = cc.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(code) = input.code {
            active.code = Set(code);
        }
        if let Some(status) = input.status {
            active.status = Set(status);
        }
        if let Some(flag) = input.active {
            active.active = Set(flag);
        }
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&*self.db).await?)
    }

    /// Soft-deletes a cost center by clearing its active flag. Budgets
    /// and transactions referencing it are kept.
    ///
    /// # Errors
    ///
    /// Returns `CostCenterError::NotFound` if no such cost center exists.
    pub async fn deactivate(&self, id: Uuid) -> Result<(), CostCenterError> {
        let cc = cost_centers::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or(CostCenterError::NotFound(id))?;

        let mut active: cost_centers::ActiveModel = cc.into();
        active.active = Set(false);
        active.updated_at = Set(Utc::now().into());
        active.update(&*self.db).await?;

        Ok(())
    }
}

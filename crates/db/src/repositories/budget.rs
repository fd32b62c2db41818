//! Budget repository.
//!
//! A budget row is keyed by `(cost_center_id, fiscal_year)` and carries
//! its planned amount on a budget line. `set_budget` is an upsert that
//! runs inside a database transaction; a concurrent insert for the same
//! pair trips the unique index and is reported as a retryable conflict.

use std::sync::Arc;

use chrono::Utc;
use costwise_core::budget::{BudgetService, BudgetError as PlannedAmountError};
use costwise_core::fiscal::FiscalYearWindow;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use crate::entities::{budget_lines, budgets, cost_centers};

/// Error types for budget operations.
#[derive(Debug, thiserror::Error)]
pub enum BudgetError {
    /// Cost center not found.
    #[error("Cost center not found: {0}")]
    CostCenterNotFound(Uuid),

    /// Amount cannot be negative.
    #[error("Amount cannot be negative")]
    NegativeAmount,

    /// Fiscal year outside the supported range.
    #[error("Invalid fiscal year: {0}")]
    InvalidFiscalYear(i32),

    /// Another writer inserted a budget for the same cost center and
    /// fiscal year; the caller may retry.
    #[error("Budget for this cost center and fiscal year was created concurrently")]
    ConcurrentUpsert,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for setting (creating or replacing) a budget.
#[derive(Debug, Clone)]
pub struct SetBudgetInput {
    /// Cost center the budget belongs to.
    pub cost_center_id: Uuid,
    /// Calendar fiscal year.
    pub fiscal_year: i32,
    /// Planned amount for the year.
    pub planned_amount: Decimal,
}

/// A budget joined with its lines and owning cost center.
#[derive(Debug, Clone)]
pub struct BudgetWithLines {
    /// The budget row.
    pub budget: budgets::Model,
    /// Budget lines, in insertion order.
    pub lines: Vec<budget_lines::Model>,
    /// Owning cost center, when it still exists.
    pub cost_center: Option<cost_centers::Model>,
}

impl BudgetWithLines {
    /// Sums the planned amounts across lines.
    #[must_use]
    pub fn planned_amount(&self) -> Decimal {
        self.lines
            .iter()
            .fold(Decimal::ZERO, |acc, line| acc + line.planned_amount)
    }
}

/// Budget repository.
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    db: Arc<DatabaseConnection>,
}

impl BudgetRepository {
    /// Creates a new budget repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Lists budgets with their lines and cost centers, optionally
    /// restricted to a fiscal year. Ordered by cost center name via the
    /// budget name, which mirrors it.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, fiscal_year: Option<i32>) -> Result<Vec<BudgetWithLines>, BudgetError> {
        let mut query = budgets::Entity::find().order_by_asc(budgets::Column::Name);
        if let Some(year) = fiscal_year {
            query = query.filter(budgets::Column::FiscalYear.eq(year));
        }

        let rows = query
            .find_with_related(budget_lines::Entity)
            .all(&*self.db)
            .await?;

        let mut out = Vec::with_capacity(rows.len());
        for (budget, lines) in rows {
            let cost_center = cost_centers::Entity::find_by_id(budget.cost_center_id)
                .one(&*self.db)
                .await?;
            out.push(BudgetWithLines {
                budget,
                lines,
                cost_center,
            });
        }

        Ok(out)
    }

    /// Creates or replaces the budget for a cost center and fiscal year.
    ///
    /// The whole upsert runs in one transaction: the re-read, the line
    /// update or budget insert, and the commit. A unique violation on
    /// `(cost_center_id, fiscal_year)` from a concurrent writer maps to
    /// `BudgetError::ConcurrentUpsert`.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NegativeAmount` for negative amounts,
    /// `BudgetError::CostCenterNotFound` for unknown cost centers, and
    /// `BudgetError::ConcurrentUpsert` on a lost insert race.
    pub async fn set_budget(&self, input: SetBudgetInput) -> Result<BudgetWithLines, BudgetError> {
        BudgetService::validate_planned_amount(input.planned_amount).map_err(|e| match e {
            PlannedAmountError::NegativeAmount => BudgetError::NegativeAmount,
        })?;

        let window = FiscalYearWindow::for_year(input.fiscal_year)
            .ok_or(BudgetError::InvalidFiscalYear(input.fiscal_year))?;

        let txn = self.db.begin().await?;

        let cost_center = cost_centers::Entity::find_by_id(input.cost_center_id)
            .one(&txn)
            .await?
            .ok_or(BudgetError::CostCenterNotFound(input.cost_center_id))?;

        let existing = budgets::Entity::find()
            .filter(budgets::Column::CostCenterId.eq(input.cost_center_id))
            .filter(budgets::Column::FiscalYear.eq(input.fiscal_year))
            .one(&txn)
            .await?;

        let result = match existing {
            Some(budget) => {
                Self::replace_planned_amount(&txn, &budget, input.planned_amount).await?;
                budget
            }
            None => {
                Self::insert_budget(&txn, &cost_center, window, input.planned_amount).await?
            }
        };

        txn.commit().await?;
        debug!(budget_id = %result.id, fiscal_year = result.fiscal_year, "Budget upsert committed");

        let lines = budget_lines::Entity::find()
            .filter(budget_lines::Column::BudgetId.eq(result.id))
            .order_by_asc(budget_lines::Column::CreatedAt)
            .all(&*self.db)
            .await?;

        Ok(BudgetWithLines {
            budget: result,
            lines,
            cost_center: Some(cost_center),
        })
    }

    /// Rewrites the planned amount on an existing budget's line.
    async fn replace_planned_amount(
        txn: &DatabaseTransaction,
        budget: &budgets::Model,
        planned_amount: Decimal,
    ) -> Result<(), BudgetError> {
        let line = budget_lines::Entity::find()
            .filter(budget_lines::Column::BudgetId.eq(budget.id))
            .order_by_asc(budget_lines::Column::CreatedAt)
            .one(txn)
            .await?;

        let now = Utc::now().into();
        match line {
            Some(line) => {
                let mut active: budget_lines::ActiveModel = line.into();
                active.planned_amount = Set(planned_amount);
                active.updated_at = Set(now);
                active.update(txn).await?;
            }
            None => {
                let line = budget_lines::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    budget_id: Set(budget.id),
                    planned_amount: Set(planned_amount),
                    created_at: Set(now),
                    updated_at: Set(now),
                };
                line.insert(txn).await?;
            }
        }

        Ok(())
    }

    /// Inserts a fresh budget plus its single planned-amount line.
    async fn insert_budget(
        txn: &DatabaseTransaction,
        cost_center: &cost_centers::Model,
        window: FiscalYearWindow,
        planned_amount: Decimal,
    ) -> Result<budgets::Model, BudgetError> {
        let now = Utc::now().into();
        let budget = budgets::ActiveModel {
            id: Set(Uuid::new_v4()),
            cost_center_id: Set(cost_center.id),
            name: Set(format!("{} FY{}", cost_center.name, window.year)),
            fiscal_year: Set(window.year),
            date_from: Set(window.date_from),
            date_to: Set(window.date_to),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let budget = budget.insert(txn).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                BudgetError::ConcurrentUpsert
            } else {
                BudgetError::Database(e)
            }
        })?;

        let line = budget_lines::ActiveModel {
            id: Set(Uuid::new_v4()),
            budget_id: Set(budget.id),
            planned_amount: Set(planned_amount),
            created_at: Set(now),
            updated_at: Set(now),
        };
        line.insert(txn).await?;

        Ok(budget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::sea_orm_active_enums::CostCenterStatus;
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn line(budget_id: Uuid, amount: Decimal) -> budget_lines::Model {
        budget_lines::Model {
            id: Uuid::new_v4(),
            budget_id,
            planned_amount: amount,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    fn budget(id: Uuid, cost_center_id: Uuid, name: &str) -> budgets::Model {
        budgets::Model {
            id,
            cost_center_id,
            name: name.to_string(),
            fiscal_year: 2026,
            date_from: chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            date_to: chrono::NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    fn cost_center(id: Uuid) -> cost_centers::Model {
        cost_centers::Model {
            id,
            name: "Marketing".to_string(),
            code: "MKT".to_string(),
            status: CostCenterStatus::Active,
            active: true,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    #[test]
    fn test_planned_amount_sums_lines() {
        let budget_id = Uuid::new_v4();
        let budget = BudgetWithLines {
            budget: budget(budget_id, Uuid::new_v4(), "Marketing FY2026"),
            lines: vec![line(budget_id, dec!(30000)), line(budget_id, dec!(20000))],
            cost_center: None,
        };

        assert_eq!(budget.planned_amount(), dec!(50000));
    }

    #[test]
    fn test_planned_amount_empty_lines_is_zero() {
        let budget = BudgetWithLines {
            budget: budget(Uuid::new_v4(), Uuid::new_v4(), "Ops FY2026"),
            lines: vec![],
            cost_center: None,
        };

        assert_eq!(budget.planned_amount(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_set_budget_updates_existing_pair_in_place() {
        let cc_id = Uuid::new_v4();
        let budget_id = Uuid::new_v4();
        let existing = budget(budget_id, cc_id, "Marketing FY2026");
        let existing_line = line(budget_id, dec!(10000));
        let mut updated_line = existing_line.clone();
        updated_line.planned_amount = dec!(25000);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![cost_center(cc_id)]])
            .append_query_results([vec![existing]])
            .append_query_results([vec![existing_line]])
            .append_query_results([vec![updated_line.clone()]])
            .append_query_results([vec![updated_line]])
            .into_connection();

        let repo = BudgetRepository::new(Arc::new(db));
        let result = repo
            .set_budget(SetBudgetInput {
                cost_center_id: cc_id,
                fiscal_year: 2026,
                planned_amount: dec!(25000),
            })
            .await
            .unwrap();

        assert_eq!(result.budget.id, budget_id);
        assert_eq!(result.lines.len(), 1);
        assert_eq!(result.planned_amount(), dec!(25000));
    }

    #[tokio::test]
    async fn test_set_budget_creates_budget_and_line() {
        let cc_id = Uuid::new_v4();
        let new_budget = budget(Uuid::new_v4(), cc_id, "Marketing FY2026");
        let new_line = line(new_budget.id, dec!(50000));

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![cost_center(cc_id)]])
            .append_query_results([Vec::<budgets::Model>::new()])
            .append_query_results([vec![new_budget.clone()]])
            .append_query_results([vec![new_line.clone()]])
            .append_query_results([vec![new_line]])
            .into_connection();

        let repo = BudgetRepository::new(Arc::new(db));
        let result = repo
            .set_budget(SetBudgetInput {
                cost_center_id: cc_id,
                fiscal_year: 2026,
                planned_amount: dec!(50000),
            })
            .await
            .unwrap();

        assert_eq!(result.budget.id, new_budget.id);
        assert_eq!(result.budget.name, "Marketing FY2026");
        assert_eq!(result.lines.len(), 1);
        assert_eq!(result.planned_amount(), dec!(50000));
    }

    #[tokio::test]
    async fn test_set_budget_rejects_negative_amount() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let repo = BudgetRepository::new(Arc::new(db));

        let err = repo
            .set_budget(SetBudgetInput {
                cost_center_id: Uuid::new_v4(),
                fiscal_year: 2026,
                planned_amount: dec!(-1),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, BudgetError::NegativeAmount));
    }

    #[tokio::test]
    async fn test_set_budget_unknown_cost_center() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<cost_centers::Model>::new()])
            .into_connection();
        let repo = BudgetRepository::new(Arc::new(db));
        let cc_id = Uuid::new_v4();

        let err = repo
            .set_budget(SetBudgetInput {
                cost_center_id: cc_id,
                fiscal_year: 2026,
                planned_amount: dec!(1000),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, BudgetError::CostCenterNotFound(id) if id == cc_id));
    }
}

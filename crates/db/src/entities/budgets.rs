//! `SeaORM` Entity for budgets table.
//!
//! `(cost_center_id, fiscal_year)` carries a unique index so concurrent
//! upserts cannot create duplicate budgets for the same year.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub cost_center_id: Uuid,
    pub name: String,
    pub fiscal_year: i32,
    pub date_from: Date,
    pub date_to: Date,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::cost_centers::Entity",
        from = "Column::CostCenterId",
        to = "super::cost_centers::Column::Id"
    )]
    CostCenters,
    #[sea_orm(has_many = "super::budget_lines::Entity")]
    BudgetLines,
}

impl Related<super::cost_centers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CostCenters.def()
    }
}

impl Related<super::budget_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BudgetLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

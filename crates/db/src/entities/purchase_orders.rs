//! `SeaORM` Entity for purchase_orders table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::PurchaseOrderStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "purchase_orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub order_number: String,
    pub vendor_id: Uuid,
    pub cost_center_id: Uuid,
    pub status: PurchaseOrderStatus,
    pub date: Date,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::contacts::Entity",
        from = "Column::VendorId",
        to = "super::contacts::Column::Id"
    )]
    Contacts,
    #[sea_orm(
        belongs_to = "super::cost_centers::Entity",
        from = "Column::CostCenterId",
        to = "super::cost_centers::Column::Id"
    )]
    CostCenters,
    #[sea_orm(has_many = "super::vendor_bills::Entity")]
    VendorBills,
}

impl Related<super::vendor_bills::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VendorBills.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

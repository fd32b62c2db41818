//! `SeaORM` Entity for invoice_lines table.
//!
//! Every line carries its own required `cost_center_id`; the invoice's
//! cost center is no longer derived from the first line.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "invoice_lines")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub invoice_id: Uuid,
    pub product_id: Option<Uuid>,
    pub cost_center_id: Uuid,
    pub description: String,
    pub quantity: Decimal,
    pub price: Decimal,
    pub tax_percent: Decimal,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer_invoices::Entity",
        from = "Column::InvoiceId",
        to = "super::customer_invoices::Column::Id"
    )]
    CustomerInvoices,
    #[sea_orm(
        belongs_to = "super::products::Entity",
        from = "Column::ProductId",
        to = "super::products::Column::Id"
    )]
    Products,
    #[sea_orm(
        belongs_to = "super::cost_centers::Entity",
        from = "Column::CostCenterId",
        to = "super::cost_centers::Column::Id"
    )]
    CostCenters,
}

impl Related<super::customer_invoices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CustomerInvoices.def()
    }
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl Related<super::cost_centers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CostCenters.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

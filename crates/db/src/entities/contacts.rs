//! `SeaORM` Entity for contacts table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ContactType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "contacts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub contact_type: ContactType,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub pincode: Option<String>,
    pub active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::vendor_bills::Entity")]
    VendorBills,
    #[sea_orm(has_many = "super::customer_invoices::Entity")]
    CustomerInvoices,
}

impl Related<super::vendor_bills::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VendorBills.def()
    }
}

impl Related<super::customer_invoices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CustomerInvoices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

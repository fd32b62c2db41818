//! Database enum mappings.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User role.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Back-office administrator.
    #[sea_orm(string_value = "admin")]
    Admin,
    /// Customer portal user.
    #[sea_orm(string_value = "portal")]
    Portal,
}

impl UserRole {
    /// Role name as stored in JWT claims.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Portal => "portal",
        }
    }
}

/// Contact classification.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "contact_type")]
#[serde(rename_all = "snake_case")]
pub enum ContactType {
    /// Supplier.
    #[sea_orm(string_value = "vendor")]
    Vendor,
    /// Customer.
    #[sea_orm(string_value = "customer")]
    Customer,
    /// Acts as both.
    #[sea_orm(string_value = "all")]
    All,
}

/// Cost center approval status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "cost_center_status")]
#[serde(rename_all = "snake_case")]
pub enum CostCenterStatus {
    /// Awaiting approval.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Approved and usable.
    #[sea_orm(string_value = "active")]
    Active,
    /// Rejected.
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Vendor bill status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "bill_status")]
#[serde(rename_all = "snake_case")]
pub enum BillStatus {
    /// Not yet submitted; excluded from spend.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Approved for payment.
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Paid out.
    #[sea_orm(string_value = "paid")]
    Paid,
    /// Rejected; excluded from spend.
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl From<BillStatus> for costwise_core::budget::BillStatus {
    fn from(status: BillStatus) -> Self {
        match status {
            BillStatus::Draft => Self::Draft,
            BillStatus::Approved => Self::Approved,
            BillStatus::Paid => Self::Paid,
            BillStatus::Rejected => Self::Rejected,
        }
    }
}

/// Customer invoice state.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "invoice_state")]
#[serde(rename_all = "snake_case")]
pub enum InvoiceState {
    /// Being drafted.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Sent and awaiting payment.
    #[sea_orm(string_value = "open")]
    Open,
    /// Paid in full.
    #[sea_orm(string_value = "paid")]
    Paid,
}

/// Purchase order status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "purchase_order_status")]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOrderStatus {
    /// Request for quotation.
    #[sea_orm(string_value = "rfq")]
    Rfq,
    /// Confirmed purchase.
    #[sea_orm(string_value = "purchase")]
    Purchase,
    /// Cancelled.
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;
    use costwise_core::budget::BillStatus as DomainStatus;

    #[test]
    fn test_bill_status_maps_to_domain() {
        assert_eq!(DomainStatus::from(BillStatus::Draft), DomainStatus::Draft);
        assert_eq!(DomainStatus::from(BillStatus::Approved), DomainStatus::Approved);
        assert_eq!(DomainStatus::from(BillStatus::Paid), DomainStatus::Paid);
        assert_eq!(DomainStatus::from(BillStatus::Rejected), DomainStatus::Rejected);
    }

    #[test]
    fn test_committed_statuses_survive_mapping() {
        assert!(DomainStatus::from(BillStatus::Paid).is_committed());
        assert!(DomainStatus::from(BillStatus::Approved).is_committed());
        assert!(!DomainStatus::from(BillStatus::Draft).is_committed());
        assert!(!DomainStatus::from(BillStatus::Rejected).is_committed());
    }
}

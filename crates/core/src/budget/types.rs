//! Budget aggregation data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Cost center identity carried into summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostCenterRef {
    /// Cost center ID.
    pub id: Uuid,
    /// Cost center name.
    pub name: String,
    /// Unique cost center code (e.g., "MKT").
    pub code: String,
}

/// Planned amount for a cost center within a fiscal year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedBudget {
    /// Cost center this budget belongs to.
    pub cost_center_id: Uuid,
    /// Fiscal year (calendar year, Jan 1 - Dec 31).
    pub fiscal_year: i32,
    /// Planned amount for the year.
    pub planned_amount: Decimal,
}

/// Vendor bill lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillStatus {
    /// Not yet submitted.
    Draft,
    /// Approved for payment.
    Approved,
    /// Paid out.
    Paid,
    /// Rejected, will never be paid.
    Rejected,
}

impl BillStatus {
    /// Returns true if the bill counts as committed spend.
    ///
    /// Draft and rejected bills are excluded from spend totals.
    #[must_use]
    pub const fn is_committed(self) -> bool {
        !matches!(self, Self::Draft | Self::Rejected)
    }
}

/// Discriminant for a transaction snapshot record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// A vendor bill with its status.
    Bill(BillStatus),
    /// A customer invoice (or invoice line); counted regardless of state.
    Invoice,
}

/// A single transaction attributable to a cost center.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Cost center the amount is booked against. `None` (or an unknown
    /// ID) drops the record from every summary.
    pub cost_center_id: Option<Uuid>,
    /// Transaction amount.
    pub amount: Decimal,
    /// Bill or invoice.
    pub kind: TransactionKind,
}

impl TransactionRecord {
    /// Creates a bill record.
    #[must_use]
    pub const fn bill(cost_center_id: Option<Uuid>, amount: Decimal, status: BillStatus) -> Self {
        Self {
            cost_center_id,
            amount,
            kind: TransactionKind::Bill(status),
        }
    }

    /// Creates an invoice record.
    #[must_use]
    pub const fn invoice(cost_center_id: Option<Uuid>, amount: Decimal) -> Self {
        Self {
            cost_center_id,
            amount,
            kind: TransactionKind::Invoice,
        }
    }
}

/// Budget-vs-actual summary for one cost center.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostCenterSummary {
    /// Cost center identity.
    pub cost_center: CostCenterRef,
    /// Planned budget for the target year (zero if none).
    pub budget: Decimal,
    /// Committed spend (bills excluding draft/rejected).
    pub spent: Decimal,
    /// Invoiced revenue, regardless of paid state.
    pub revenue: Decimal,
    /// `budget - spent`. Negative when over budget.
    pub remaining: Decimal,
    /// Reporting alias, always equal to `remaining`.
    pub variance: Decimal,
    /// `spent / budget * 100`, zero when there is no budget. Not clamped;
    /// values above 100 mean over budget.
    pub percent_used: Decimal,
}

/// Totals across all cost centers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TotalSummary {
    /// Sum of planned budgets.
    pub total_budget: Decimal,
    /// Sum of committed spend.
    pub total_spent: Decimal,
    /// Sum of invoiced revenue.
    pub total_revenue: Decimal,
    /// Sum of remaining amounts.
    pub total_remaining: Decimal,
}

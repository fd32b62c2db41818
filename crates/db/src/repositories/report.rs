//! Report repository.
//!
//! Loads the budget-vs-actual snapshot for a fiscal year and hands it
//! to the pure aggregation in `costwise_core`. Unknown cost center
//! references drop out of the summary rather than erroring.

use std::sync::Arc;

use costwise_core::budget::{
    BudgetService, CostCenterRef, CostCenterSummary, PlannedBudget, TotalSummary,
    TransactionRecord,
};
use costwise_core::invoice::{InvoiceError, InvoiceService, LineItem};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::{budget_lines, budgets, cost_centers, invoice_lines, vendor_bills};

/// Error types for report operations.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// A stored invoice line failed total computation.
    #[error(transparent)]
    Invoice(#[from] InvoiceError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// The full budget summary report for one fiscal year.
#[derive(Debug, Clone)]
pub struct BudgetSummaryReport {
    /// Fiscal year the report covers.
    pub fiscal_year: i32,
    /// Per cost center rows, in cost center name order.
    pub summaries: Vec<CostCenterSummary>,
    /// Column totals across all rows.
    pub totals: TotalSummary,
}

/// Report repository.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: Arc<DatabaseConnection>,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Builds the budget-vs-actual report for a fiscal year.
    ///
    /// Spend comes from vendor bills excluding draft and rejected ones,
    /// revenue from invoice line totals. Both are attributed through the
    /// explicit `cost_center_id` on each row.
    ///
    /// # Errors
    ///
    /// Returns an error if any query fails or a stored invoice line is
    /// invalid.
    pub async fn budget_summary(&self, fiscal_year: i32) -> Result<BudgetSummaryReport, ReportError> {
        let centers = cost_centers::Entity::find()
            .filter(cost_centers::Column::Active.eq(true))
            .order_by_asc(cost_centers::Column::Name)
            .all(&*self.db)
            .await?;

        let refs: Vec<CostCenterRef> = centers
            .into_iter()
            .map(|cc| CostCenterRef {
                id: cc.id,
                name: cc.name,
                code: cc.code,
            })
            .collect();

        let budgets = self.load_planned_budgets(fiscal_year).await?;
        let mut transactions = self.load_bill_records().await?;
        transactions.extend(self.load_invoice_records().await?);

        let summaries = BudgetService::summarize(&refs, &budgets, &transactions, fiscal_year);
        let totals = BudgetService::totals(&summaries);

        Ok(BudgetSummaryReport {
            fiscal_year,
            summaries,
            totals,
        })
    }

    /// Loads planned amounts per cost center for the fiscal year.
    async fn load_planned_budgets(
        &self,
        fiscal_year: i32,
    ) -> Result<Vec<PlannedBudget>, ReportError> {
        let rows = budgets::Entity::find()
            .filter(budgets::Column::FiscalYear.eq(fiscal_year))
            .find_with_related(budget_lines::Entity)
            .all(&*self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(budget, lines)| PlannedBudget {
                cost_center_id: budget.cost_center_id,
                fiscal_year: budget.fiscal_year,
                planned_amount: lines
                    .iter()
                    .fold(rust_decimal::Decimal::ZERO, |acc, l| acc + l.planned_amount),
            })
            .collect())
    }

    /// Loads every vendor bill as a spend record.
    async fn load_bill_records(&self) -> Result<Vec<TransactionRecord>, ReportError> {
        let bills = vendor_bills::Entity::find().all(&*self.db).await?;

        Ok(bills
            .into_iter()
            .map(|bill| {
                TransactionRecord::bill(Some(bill.cost_center_id), bill.amount, bill.status.into())
            })
            .collect())
    }

    /// Loads every invoice line as a revenue record, valued at its line
    /// total including tax.
    async fn load_invoice_records(&self) -> Result<Vec<TransactionRecord>, ReportError> {
        let lines = invoice_lines::Entity::find().all(&*self.db).await?;

        let mut records = Vec::with_capacity(lines.len());
        for line in lines {
            let item = LineItem::new(line.quantity, line.price, line.tax_percent);
            let total = InvoiceService::line_total(&item)?;
            records.push(TransactionRecord::invoice(Some(line.cost_center_id), total));
        }

        Ok(records)
    }
}

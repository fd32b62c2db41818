//! Budget summary computation.

use rust_decimal::Decimal;

use super::error::BudgetError;
use super::types::{
    CostCenterRef, CostCenterSummary, PlannedBudget, TotalSummary, TransactionKind,
    TransactionRecord,
};

/// Budget aggregation service.
pub struct BudgetService;

impl BudgetService {
    /// Computes the budget-vs-actual summary for every cost center.
    ///
    /// Per cost center:
    /// - `budget` is the planned amount for `fiscal_year`, or zero
    /// - `spent` sums bills whose status is neither draft nor rejected
    /// - `revenue` sums invoices regardless of paid state
    /// - `remaining = budget - spent`, `variance == remaining`
    /// - `percent_used = spent / budget * 100` (zero when budget is zero,
    ///   rounded to 2 decimal places, never clamped)
    ///
    /// Transactions with no cost center, or one not in `cost_centers`,
    /// are excluded rather than erroring.
    #[must_use]
    pub fn summarize(
        cost_centers: &[CostCenterRef],
        budgets: &[PlannedBudget],
        transactions: &[TransactionRecord],
        fiscal_year: i32,
    ) -> Vec<CostCenterSummary> {
        cost_centers
            .iter()
            .map(|cc| Self::summarize_one(cc, budgets, transactions, fiscal_year))
            .collect()
    }

    fn summarize_one(
        cc: &CostCenterRef,
        budgets: &[PlannedBudget],
        transactions: &[TransactionRecord],
        fiscal_year: i32,
    ) -> CostCenterSummary {
        let budget = budgets
            .iter()
            .find(|b| b.cost_center_id == cc.id && b.fiscal_year == fiscal_year)
            .map_or(Decimal::ZERO, |b| b.planned_amount);

        let mut spent = Decimal::ZERO;
        let mut revenue = Decimal::ZERO;

        for tx in transactions {
            if tx.cost_center_id != Some(cc.id) {
                continue;
            }
            match tx.kind {
                TransactionKind::Bill(status) if status.is_committed() => spent += tx.amount,
                TransactionKind::Bill(_) => {}
                TransactionKind::Invoice => revenue += tx.amount,
            }
        }

        let remaining = budget - spent;

        let percent_used = if budget > Decimal::ZERO {
            (spent / budget * Decimal::ONE_HUNDRED).round_dp(2)
        } else {
            Decimal::ZERO
        };

        CostCenterSummary {
            cost_center: cc.clone(),
            budget,
            spent,
            revenue,
            remaining,
            variance: remaining,
            percent_used,
        }
    }

    /// Sums the per-cost-center summaries into workspace-wide totals.
    #[must_use]
    pub fn totals(summaries: &[CostCenterSummary]) -> TotalSummary {
        summaries.iter().fold(TotalSummary::default(), |mut acc, s| {
            acc.total_budget += s.budget;
            acc.total_spent += s.spent;
            acc.total_revenue += s.revenue;
            acc.total_remaining += s.remaining;
            acc
        })
    }

    /// Validates a planned amount before it is persisted.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NegativeAmount` if the amount is negative.
    pub fn validate_planned_amount(amount: Decimal) -> Result<(), BudgetError> {
        if amount < Decimal::ZERO {
            return Err(BudgetError::NegativeAmount);
        }
        Ok(())
    }
}

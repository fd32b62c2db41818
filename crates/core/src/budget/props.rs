//! Property-based tests for budget aggregation.

use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::service::BudgetService;
use super::types::{BillStatus, CostCenterRef, PlannedBudget, TransactionRecord};

const FY: i32 = 2026;

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_00).prop_map(|n| Decimal::new(n, 2))
}

fn status_strategy() -> impl Strategy<Value = BillStatus> {
    prop_oneof![
        Just(BillStatus::Draft),
        Just(BillStatus::Approved),
        Just(BillStatus::Paid),
        Just(BillStatus::Rejected),
    ]
}

fn fixed_cost_center() -> CostCenterRef {
    CostCenterRef {
        id: Uuid::from_u128(1),
        name: "Marketing".to_string(),
        code: "MKT".to_string(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// remaining == budget - spent and variance == remaining, always.
    #[test]
    fn prop_remaining_and_variance_identity(
        budget in amount_strategy(),
        bills in prop::collection::vec((amount_strategy(), status_strategy()), 0..12),
    ) {
        let cc = fixed_cost_center();
        let budgets = [PlannedBudget {
            cost_center_id: cc.id,
            fiscal_year: FY,
            planned_amount: budget,
        }];
        let transactions: Vec<_> = bills
            .iter()
            .map(|(amount, status)| TransactionRecord::bill(Some(cc.id), *amount, *status))
            .collect();

        let summary = &BudgetService::summarize(
            std::slice::from_ref(&cc), &budgets, &transactions, FY,
        )[0];

        let expected_spent: Decimal = bills
            .iter()
            .filter(|(_, s)| s.is_committed())
            .map(|(a, _)| *a)
            .sum();

        prop_assert_eq!(summary.spent, expected_spent);
        prop_assert_eq!(summary.remaining, summary.budget - summary.spent);
        prop_assert_eq!(summary.variance, summary.remaining);
    }

    /// Draft and rejected bills stay out of spend; all other statuses count.
    #[test]
    fn prop_committed_statuses(status in status_strategy(), amount in amount_strategy()) {
        let cc = fixed_cost_center();
        let transactions = [TransactionRecord::bill(Some(cc.id), amount, status)];

        let summary = &BudgetService::summarize(
            std::slice::from_ref(&cc), &[], &transactions, FY,
        )[0];

        match status {
            BillStatus::Draft | BillStatus::Rejected => {
                prop_assert_eq!(summary.spent, Decimal::ZERO);
            }
            BillStatus::Approved | BillStatus::Paid => {
                prop_assert_eq!(summary.spent, amount);
            }
        }
    }

    /// percent_used never panics, never goes negative, and is zero for a
    /// zero budget no matter the spend.
    #[test]
    fn prop_percent_used_is_defined(
        budget in amount_strategy(),
        spend in amount_strategy(),
    ) {
        let cc = fixed_cost_center();
        let budgets = [PlannedBudget {
            cost_center_id: cc.id,
            fiscal_year: FY,
            planned_amount: budget,
        }];
        let transactions = [TransactionRecord::bill(Some(cc.id), spend, BillStatus::Paid)];

        let summary = &BudgetService::summarize(
            std::slice::from_ref(&cc), &budgets, &transactions, FY,
        )[0];

        prop_assert!(summary.percent_used >= Decimal::ZERO);
        if budget.is_zero() {
            prop_assert_eq!(summary.percent_used, Decimal::ZERO);
        }
    }

    /// Totals are the column sums of the per-cost-center summaries.
    #[test]
    fn prop_totals_are_column_sums(
        budgets in prop::collection::vec(amount_strategy(), 1..6),
        spends in prop::collection::vec(amount_strategy(), 1..6),
    ) {
        let cost_centers: Vec<CostCenterRef> = (0..budgets.len())
            .map(|i| CostCenterRef {
                id: Uuid::from_u128(i as u128 + 1),
                name: format!("CC {i}"),
                code: format!("C{i}"),
            })
            .collect();
        let planned: Vec<PlannedBudget> = cost_centers
            .iter()
            .zip(&budgets)
            .map(|(cc, amount)| PlannedBudget {
                cost_center_id: cc.id,
                fiscal_year: FY,
                planned_amount: *amount,
            })
            .collect();
        let transactions: Vec<TransactionRecord> = cost_centers
            .iter()
            .zip(&spends)
            .map(|(cc, amount)| TransactionRecord::bill(Some(cc.id), *amount, BillStatus::Paid))
            .collect();

        let summaries = BudgetService::summarize(&cost_centers, &planned, &transactions, FY);
        let totals = BudgetService::totals(&summaries);

        let budget_sum: Decimal = summaries.iter().map(|s| s.budget).sum();
        let spent_sum: Decimal = summaries.iter().map(|s| s.spent).sum();
        let remaining_sum: Decimal = summaries.iter().map(|s| s.remaining).sum();

        prop_assert_eq!(totals.total_budget, budget_sum);
        prop_assert_eq!(totals.total_spent, spent_sum);
        prop_assert_eq!(totals.total_remaining, remaining_sum);
    }
}

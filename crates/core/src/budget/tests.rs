//! Scenario tests for budget aggregation.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use super::service::BudgetService;
use super::types::{BillStatus, CostCenterRef, PlannedBudget, TransactionRecord};

const FY: i32 = 2026;

fn cost_center(name: &str, code: &str) -> CostCenterRef {
    CostCenterRef {
        id: Uuid::new_v4(),
        name: name.to_string(),
        code: code.to_string(),
    }
}

fn planned(cc: &CostCenterRef, amount: Decimal) -> PlannedBudget {
    PlannedBudget {
        cost_center_id: cc.id,
        fiscal_year: FY,
        planned_amount: amount,
    }
}

#[test]
fn test_spent_excludes_draft_bills() {
    let mkt = cost_center("Marketing", "MKT");
    let budgets = [planned(&mkt, dec!(50000))];
    let transactions = [
        TransactionRecord::bill(Some(mkt.id), dec!(5000), BillStatus::Paid),
        TransactionRecord::bill(Some(mkt.id), dec!(10000), BillStatus::Draft),
    ];

    let summary = BudgetService::summarize(&[mkt], &budgets, &transactions, FY);

    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].budget, dec!(50000));
    assert_eq!(summary[0].spent, dec!(5000));
    assert_eq!(summary[0].remaining, dec!(45000));
    assert_eq!(summary[0].percent_used, dec!(10.0));
}

#[test]
fn test_rejected_bills_are_not_spend() {
    let ops = cost_center("Operations", "OPS");
    let budgets = [planned(&ops, dec!(1000))];
    let transactions = [
        TransactionRecord::bill(Some(ops.id), dec!(200), BillStatus::Rejected),
        TransactionRecord::bill(Some(ops.id), dec!(300), BillStatus::Approved),
    ];

    let summary = BudgetService::summarize(&[ops], &budgets, &transactions, FY);

    assert_eq!(summary[0].spent, dec!(300));
}

#[test]
fn test_revenue_counts_all_invoices() {
    let ops = cost_center("Operations", "OPS");
    let transactions = [
        TransactionRecord::invoice(Some(ops.id), dec!(15000)),
        TransactionRecord::invoice(Some(ops.id), dec!(8500)),
    ];

    let summary = BudgetService::summarize(&[ops], &[], &transactions, FY);

    assert_eq!(summary[0].revenue, dec!(23500));
    assert_eq!(summary[0].spent, Decimal::ZERO);
}

#[test]
fn test_missing_budget_defaults_to_zero() {
    let cc = cost_center("Facilities", "FAC");

    let summary = BudgetService::summarize(std::slice::from_ref(&cc), &[], &[], FY);

    assert_eq!(summary[0].budget, Decimal::ZERO);
    assert_eq!(summary[0].percent_used, Decimal::ZERO);
}

#[test]
fn test_zero_budget_with_spend_does_not_divide() {
    let cc = cost_center("Logistics", "LOG");
    let transactions = [TransactionRecord::bill(
        Some(cc.id),
        dec!(500),
        BillStatus::Paid,
    )];

    let summary = BudgetService::summarize(std::slice::from_ref(&cc), &[], &transactions, FY);

    assert_eq!(summary[0].percent_used, Decimal::ZERO);
    assert_eq!(summary[0].remaining, dec!(-500));
}

#[test]
fn test_over_budget_percent_is_not_clamped() {
    let cc = cost_center("IT", "IT");
    let budgets = [planned(&cc, dec!(100))];
    let transactions = [TransactionRecord::bill(
        Some(cc.id),
        dec!(250),
        BillStatus::Paid,
    )];

    let summary = BudgetService::summarize(std::slice::from_ref(&cc), &budgets, &transactions, FY);

    assert_eq!(summary[0].percent_used, dec!(250));
    assert_eq!(summary[0].remaining, dec!(-150));
}

#[test]
fn test_budget_for_other_year_is_ignored() {
    let cc = cost_center("HR", "HR");
    let budgets = [PlannedBudget {
        cost_center_id: cc.id,
        fiscal_year: FY - 1,
        planned_amount: dec!(40000),
    }];

    let summary = BudgetService::summarize(std::slice::from_ref(&cc), &budgets, &[], FY);

    assert_eq!(summary[0].budget, Decimal::ZERO);
}

#[test]
fn test_unknown_cost_center_transactions_excluded() {
    let cc = cost_center("Sales", "SALES");
    let transactions = [
        TransactionRecord::bill(Some(Uuid::new_v4()), dec!(999), BillStatus::Paid),
        TransactionRecord::bill(None, dec!(777), BillStatus::Paid),
        TransactionRecord::bill(Some(cc.id), dec!(100), BillStatus::Paid),
    ];

    let summary = BudgetService::summarize(std::slice::from_ref(&cc), &[], &transactions, FY);

    assert_eq!(summary[0].spent, dec!(100));
}

#[test]
fn test_totals_across_cost_centers() {
    let mkt = cost_center("Marketing", "MKT");
    let it = cost_center("IT", "IT");
    let budgets = [planned(&mkt, dec!(50000)), planned(&it, dec!(80000))];
    let transactions = [
        TransactionRecord::bill(Some(mkt.id), dec!(5000), BillStatus::Paid),
        TransactionRecord::bill(Some(it.id), dec!(3200), BillStatus::Paid),
    ];

    let summaries = BudgetService::summarize(&[mkt, it], &budgets, &transactions, FY);
    let totals = BudgetService::totals(&summaries);

    assert_eq!(totals.total_budget, dec!(130000));
    assert_eq!(totals.total_spent, dec!(8200));
    assert_eq!(totals.total_remaining, dec!(121800));
}

#[test]
fn test_validate_planned_amount() {
    use super::error::BudgetError;

    assert!(BudgetService::validate_planned_amount(dec!(0)).is_ok());
    assert!(BudgetService::validate_planned_amount(dec!(50000)).is_ok());
    assert_eq!(
        BudgetService::validate_planned_amount(dec!(-1)),
        Err(BudgetError::NegativeAmount)
    );
}

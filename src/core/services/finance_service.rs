//! Reconciles an estimate against actually-incurred ledger cost and
//! collected cash.

use serde::{Deserialize, Serialize};

use crate::book::{ApprovalStatus, LedgerSlice, Project};

use super::cost_service::CostService;

/// Per-project profitability and collection metrics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinancialSummary {
    pub contract_total: f64,
    pub estimated_direct_cost: f64,
    pub estimated_profit: f64,
    pub estimated_margin: f64,
    pub actual_order_cost: f64,
    pub actual_labor_cost: f64,
    pub actual_expense_cost: f64,
    pub total_spent: f64,
    pub actual_profit: f64,
    pub actual_margin: f64,
    /// Spent over estimated cost-side direct cost, in percent.
    /// Deliberately unbounded above 100: it is a budget-burn indicator.
    pub execution_rate: f64,
    pub collected: f64,
    pub outstanding: f64,
    pub collection_rate: f64,
}

/// Stateless reconciliation over one project plus one ledger snapshot.
pub struct FinanceService;

impl FinanceService {
    pub fn summarize(project: &Project, ledger: &LedgerSlice<'_>) -> FinancialSummary {
        let cost = CostService::compute_cost(project);

        let actual_order_cost: f64 = ledger
            .purchase_orders
            .iter()
            .filter(|order| order.project_id == project.id)
            .map(|order| order.amount)
            .sum();

        let actual_labor_cost: f64 = ledger
            .labor_entries
            .iter()
            .filter(|entry| entry.project_id == project.id)
            .map(|entry| entry.net_pay())
            .sum();

        let actual_expense_cost: f64 = ledger
            .expenses
            .iter()
            .filter(|expense| {
                expense.project_id == project.id && expense.status == ApprovalStatus::Approved
            })
            .map(|expense| expense.amount)
            .sum();

        let total_spent = actual_order_cost + actual_labor_cost + actual_expense_cost;
        let actual_profit = cost.final_total - total_spent;

        let actual_margin = if cost.final_total <= 0.0 {
            0.0
        } else {
            actual_profit / cost.final_total * 100.0
        };
        let execution_rate = if cost.cost_direct <= 0.0 {
            0.0
        } else {
            total_spent / cost.cost_direct * 100.0
        };

        let collected = CostService::collected_amount(project);

        FinancialSummary {
            contract_total: cost.final_total,
            estimated_direct_cost: cost.direct_cost,
            estimated_profit: cost.profit_amount,
            estimated_margin: CostService::margin_percent(project),
            actual_order_cost,
            actual_labor_cost,
            actual_expense_cost,
            total_spent,
            actual_profit,
            actual_margin,
            execution_rate,
            collected,
            outstanding: cost.final_total - collected,
            collection_rate: CostService::collection_rate(project),
        }
    }
}

//! Buckets payment and spend events into calendar months across all
//! projects of a book snapshot.

use serde::{Deserialize, Serialize};

use crate::book::{ApprovalStatus, LedgerSlice, MonthKey, Project};

use super::cost_service::CostService;

/// Cash movement within one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyBucket {
    pub month: MonthKey,
    pub revenue: f64,
    pub order_spend: f64,
    pub labor_spend: f64,
    pub expense_spend: f64,
    pub net: f64,
}

/// Stateless calendar-month aggregation. Each call is a pure function of
/// the snapshot and the month key; a cumulative cash position is the
/// caller's running sum over consecutive buckets.
pub struct CashflowService;

impl CashflowService {
    pub fn aggregate_month(
        projects: &[Project],
        ledger: &LedgerSlice<'_>,
        month: MonthKey,
    ) -> MonthlyBucket {
        let mut revenue = 0.0;
        for project in projects {
            let final_total = CostService::contract_total(project);
            for milestone in &project.payment_schedule {
                let paid_in_month = milestone
                    .paid_date
                    .map(|date| month.contains(date))
                    .unwrap_or(false);
                if milestone.paid && paid_in_month {
                    revenue += final_total * milestone.percent_of_total / 100.0;
                }
            }
        }

        let order_spend: f64 = ledger
            .purchase_orders
            .iter()
            .filter(|order| month.contains(order.order_date))
            .map(|order| order.amount)
            .sum();

        let labor_spend: f64 = ledger
            .labor_entries
            .iter()
            .filter(|entry| {
                entry.paid
                    && entry
                        .paid_date
                        .map(|date| month.contains(date))
                        .unwrap_or(false)
            })
            .map(|entry| entry.net_pay())
            .sum();

        let expense_spend: f64 = ledger
            .expenses
            .iter()
            .filter(|expense| {
                expense.status == ApprovalStatus::Approved && month.contains(expense.date)
            })
            .map(|expense| expense.amount)
            .sum();

        MonthlyBucket {
            month,
            revenue,
            order_spend,
            labor_spend,
            expense_spend,
            net: revenue - (order_spend + labor_spend + expense_spend),
        }
    }

    /// Consecutive buckets starting at `from`, oldest first.
    pub fn aggregate_months(
        projects: &[Project],
        ledger: &LedgerSlice<'_>,
        from: MonthKey,
        count: usize,
    ) -> Vec<MonthlyBucket> {
        let mut buckets = Vec::with_capacity(count);
        let mut month = from;
        for _ in 0..count {
            buckets.push(Self::aggregate_month(projects, ledger, month));
            month = month.next();
        }
        buckets
    }
}

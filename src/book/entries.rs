use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Approval state of an expense claim. Only approved expenses count
/// toward project spend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// A procurement order placed against a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: Uuid,
    pub project_id: Uuid,
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub amount: f64,
    pub order_date: NaiveDate,
}

impl PurchaseOrder {
    pub fn new(project_id: Uuid, vendor: impl Into<String>, amount: f64, order_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id,
            vendor: vendor.into(),
            amount,
            order_date,
        }
    }
}

/// A payroll entry for one worker on one project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaborEntry {
    pub id: Uuid,
    pub project_id: Uuid,
    #[serde(default)]
    pub worker: String,
    #[serde(default)]
    pub daily_rate: f64,
    #[serde(default)]
    pub days: f64,
    #[serde(default)]
    pub meal_cost: f64,
    #[serde(default)]
    pub transport_cost: f64,
    #[serde(default)]
    pub overtime_cost: f64,
    #[serde(default)]
    pub deduction: f64,
    #[serde(default)]
    pub paid: bool,
    #[serde(default)]
    pub paid_date: Option<NaiveDate>,
}

impl LaborEntry {
    pub fn new(project_id: Uuid, worker: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id,
            worker: worker.into(),
            daily_rate: 0.0,
            days: 0.0,
            meal_cost: 0.0,
            transport_cost: 0.0,
            overtime_cost: 0.0,
            deduction: 0.0,
            paid: false,
            paid_date: None,
        }
    }

    /// Net pay for the entry. A deduction larger than the earnings makes
    /// this negative; the value is not clamped.
    pub fn net_pay(&self) -> f64 {
        self.daily_rate * self.days + self.meal_cost + self.transport_cost + self.overtime_cost
            - self.deduction
    }
}

/// A site expense claim routed through the approval workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseEntry {
    pub id: Uuid,
    pub project_id: Uuid,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub status: ApprovalStatus,
    pub date: NaiveDate,
}

impl ExpenseEntry {
    pub fn new(project_id: Uuid, description: impl Into<String>, amount: f64, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id,
            description: description.into(),
            amount,
            status: ApprovalStatus::Pending,
            date,
        }
    }
}

/// Borrowed view over the three ledger collections of one book snapshot.
///
/// Core services take this instead of touching a [`crate::book::ProjectBook`]
/// directly, so callers can evaluate against any consistent snapshot.
#[derive(Debug, Clone, Copy)]
pub struct LedgerSlice<'a> {
    pub purchase_orders: &'a [PurchaseOrder],
    pub labor_entries: &'a [LaborEntry],
    pub expenses: &'a [ExpenseEntry],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn net_pay_is_not_clamped_at_zero() {
        let mut entry = LaborEntry::new(Uuid::new_v4(), "Chen");
        entry.daily_rate = 100.0;
        entry.days = 5.0;
        entry.deduction = 600.0;
        assert_eq!(entry.net_pay(), -100.0);
    }

    #[test]
    fn expense_defaults_to_pending() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let expense = ExpenseEntry::new(Uuid::new_v4(), "Site fuel", 120.0, date);
        assert_eq!(expense.status, ApprovalStatus::Pending);
    }
}

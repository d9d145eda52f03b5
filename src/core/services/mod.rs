pub mod cashflow_service;
pub mod cost_service;
pub mod finance_service;
pub mod schedule_service;

pub use cashflow_service::{CashflowService, MonthlyBucket};
pub use cost_service::{CategoryCost, CostResult, CostService};
pub use finance_service::{FinanceService, FinancialSummary};
pub use schedule_service::{ScheduleService, ScheduleSynthesis};

#[cfg(test)]
mod tests;

pub mod services;

pub use services::{
    CashflowService, CategoryCost, CostResult, CostService, FinanceService, FinancialSummary,
    MonthlyBucket, ScheduleService, ScheduleSynthesis,
};

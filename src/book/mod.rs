//! Project-book domain models, persistence-friendly types, and helpers.

#[allow(clippy::module_inception)]
pub mod book;
pub mod entries;
pub mod line_item;
pub mod month;
pub mod payment;
pub mod project;
pub mod task;

pub use book::ProjectBook;
pub use entries::{ApprovalStatus, ExpenseEntry, LaborEntry, LedgerSlice, PurchaseOrder};
pub use line_item::LineItem;
pub use month::MonthKey;
pub use payment::PaymentMilestone;
pub use project::{Project, RoundingUnit};
pub use task::ScheduleTask;

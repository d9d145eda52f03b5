use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    entries::{ExpenseEntry, LaborEntry, LedgerSlice, PurchaseOrder},
    project::Project,
};

const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Aggregate snapshot of a company's projects and ledger collections.
///
/// A book is the unit of consistency: every computation evaluates against
/// the collections of one loaded book, never against a mix of two loads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectBook {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub purchase_orders: Vec<PurchaseOrder>,
    #[serde(default)]
    pub labor_entries: Vec<LaborEntry>,
    #[serde(default)]
    pub expenses: Vec<ExpenseEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "ProjectBook::schema_version_default")]
    pub schema_version: u8,
}

impl ProjectBook {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            projects: Vec::new(),
            purchase_orders: Vec::new(),
            labor_entries: Vec::new(),
            expenses: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn add_project(&mut self, project: Project) -> Uuid {
        let id = project.id;
        self.projects.push(project);
        self.touch();
        id
    }

    pub fn add_purchase_order(&mut self, order: PurchaseOrder) -> Uuid {
        let id = order.id;
        self.purchase_orders.push(order);
        self.touch();
        id
    }

    pub fn add_labor_entry(&mut self, entry: LaborEntry) -> Uuid {
        let id = entry.id;
        self.labor_entries.push(entry);
        self.touch();
        id
    }

    pub fn add_expense(&mut self, expense: ExpenseEntry) -> Uuid {
        let id = expense.id;
        self.expenses.push(expense);
        self.touch();
        id
    }

    pub fn project(&self, id: Uuid) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    pub fn project_mut(&mut self, id: Uuid) -> Option<&mut Project> {
        self.projects.iter_mut().find(|project| project.id == id)
    }

    pub fn project_by_name(&self, name: &str) -> Option<&Project> {
        self.projects
            .iter()
            .find(|project| project.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Borrowed view of the ledger collections for the core services.
    pub fn ledger(&self) -> LedgerSlice<'_> {
        LedgerSlice {
            purchase_orders: &self.purchase_orders,
            labor_entries: &self.labor_entries,
            expenses: &self.expenses,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

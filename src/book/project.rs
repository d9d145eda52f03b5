use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{line_item::LineItem, payment::PaymentMilestone, task::ScheduleTask};

/// Granularity to which a raw contract total is floored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum RoundingUnit {
    None,
    TenThousand,
    #[default]
    HundredThousand,
    /// The contract total is overridden by [`Project::manual_total`].
    Manual,
}

impl RoundingUnit {
    /// Floor denomination, when the policy is a floor.
    pub fn denomination(self) -> Option<f64> {
        match self {
            RoundingUnit::None | RoundingUnit::Manual => None,
            RoundingUnit::TenThousand => Some(10_000.0),
            RoundingUnit::HundredThousand => Some(100_000.0),
        }
    }
}

/// One construction project: the estimate, the contract payment plan, and
/// the synthesized schedule.
///
/// The computation services in [`crate::core`] treat a project as a
/// read-only snapshot; the only mutating core entry point is the
/// deliberately destructive schedule regeneration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub client: Option<String>,
    /// Floor area in area units; drives schedule duration multipliers.
    #[serde(default)]
    pub floor_area: f64,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub profit_percent: f64,
    #[serde(default)]
    pub rounding_unit: RoundingUnit,
    /// Contract override used by [`RoundingUnit::Manual`]; 0 means unset.
    #[serde(default)]
    pub manual_total: f64,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    #[serde(default)]
    pub payment_schedule: Vec<PaymentMilestone>,
    #[serde(default)]
    pub schedule_tasks: Vec<ScheduleTask>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn new(name: impl Into<String>, start_date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            client: None,
            floor_area: 0.0,
            start_date,
            profit_percent: 10.0,
            rounding_unit: RoundingUnit::default(),
            manual_total: 0.0,
            line_items: Vec::new(),
            payment_schedule: Vec::new(),
            schedule_tasks: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn add_line_item(&mut self, item: LineItem) -> Uuid {
        let id = item.id;
        self.line_items.push(item);
        self.touch();
        id
    }

    pub fn add_milestone(&mut self, milestone: PaymentMilestone) {
        self.payment_schedule.push(milestone);
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row of a synthesized construction schedule.
///
/// `end` is exclusive: it names the day after the last worked day, so a
/// follow-on task may start on `end` without double-booking the crew.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleTask {
    pub id: Uuid,
    /// Catalog id of the source category.
    pub category_id: String,
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub assignee: String,
    #[serde(default)]
    pub note: String,
    /// Completion percentage, 0..=100. Hand-edited by the site workflow.
    #[serde(default)]
    pub progress: f64,
}

impl ScheduleTask {
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

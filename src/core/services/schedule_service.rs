//! Synthesizes a construction schedule from an estimate's category mix.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::book::{Project, ScheduleTask};
use crate::catalog::{self, OverlapGroup, TradeCategory, ROSTER};

use super::cost_service::{CategoryCost, CostService};

/// Share of a task's duration that a same-group successor may reuse.
const OVERLAP_TAIL: f64 = 0.4;
/// Shortest task the synthesizer will emit, in days.
const MIN_TASK_DAYS: i64 = 2;

/// Result of one synthesis run: the ordered task list plus the elapsed
/// span from project start to the schedule cursor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleSynthesis {
    pub tasks: Vec<ScheduleTask>,
    pub total_days: i64,
}

impl ScheduleSynthesis {
    fn empty() -> Self {
        Self {
            tasks: Vec::new(),
            total_days: 0,
        }
    }
}

/// Greedy, deterministic schedule synthesis. Not an optimizer: categories
/// run in catalog sequence order, and only fixed overlap groups may run
/// concurrently.
pub struct ScheduleService;

impl ScheduleService {
    /// Synthesizes a schedule without touching the project. An estimate
    /// with no positive category subtotal yields an empty synthesis.
    pub fn synthesize(project: &Project) -> ScheduleSynthesis {
        let cost = CostService::compute_cost(project);
        let active: Vec<(&'static TradeCategory, &CategoryCost)> = cost
            .categories
            .iter()
            .filter(|category| category.subtotal > 0.0)
            .filter_map(|category| {
                catalog::category(&category.category_id).map(|meta| (meta, category))
            })
            .collect();
        if active.is_empty() {
            return ScheduleSynthesis::empty();
        }

        let max_subtotal = active
            .iter()
            .map(|(_, category)| category.subtotal)
            .fold(0.0_f64, f64::max);

        let mut tasks = Vec::with_capacity(active.len());
        let mut cursor = project.start_date;
        let mut current_group: Option<OverlapGroup> = None;
        let mut previous: Option<(NaiveDate, i64)> = None;

        for (index, (meta, category)) in active.iter().enumerate() {
            let days = Self::task_days(meta, category.subtotal, max_subtotal, project.floor_area);

            let start = match (meta.overlap_group, current_group, previous) {
                // Same overlap group: pull the start back into the tail of
                // the previous task instead of queueing behind it.
                (Some(group), Some(current), Some((prev_start, prev_days)))
                    if group == current =>
                {
                    prev_start + Duration::days(prev_days - Self::overlap_days(prev_days))
                }
                _ => cursor,
            };
            let end = start + Duration::days(days);

            tasks.push(ScheduleTask {
                id: Uuid::new_v4(),
                category_id: category.category_id.clone(),
                name: meta.name.to_string(),
                start,
                end,
                assignee: ROSTER[index % ROSTER.len()].to_string(),
                note: format!(
                    "{} items, estimate {:.0}",
                    category.item_count, category.subtotal
                ),
                progress: 0.0,
            });

            // The cursor never moves backwards even when a short
            // overlapping task ends before its predecessor.
            cursor = cursor.max(end);
            current_group = meta.overlap_group;
            previous = Some((start, days));
        }

        ScheduleSynthesis {
            total_days: (cursor - project.start_date).num_days(),
            tasks,
        }
    }

    /// Regenerates the project schedule in place. This is a full replace:
    /// any hand-edited tasks from a previous run are discarded.
    pub fn regenerate(project: &mut Project) -> ScheduleSynthesis {
        let synthesis = Self::synthesize(project);
        project.schedule_tasks = synthesis.tasks.clone();
        project.touch();
        synthesis
    }

    fn task_days(
        meta: &TradeCategory,
        subtotal: f64,
        max_subtotal: f64,
        floor_area: f64,
    ) -> i64 {
        let cost_ratio = if max_subtotal > 0.0 {
            subtotal / max_subtotal
        } else {
            0.0
        };
        let mut days = ((meta.base_days as f64) * (0.5 + 0.7 * cost_ratio)).round() as i64;
        days = days.max(MIN_TASK_DAYS);
        // Area multipliers compound: a >100 project passes both gates.
        if floor_area > 50.0 {
            days = ((days as f64) * 1.2).round() as i64;
        }
        if floor_area > 100.0 {
            days = ((days as f64) * 1.4).round() as i64;
        }
        days
    }

    fn overlap_days(days: i64) -> i64 {
        ((days as f64) * OVERLAP_TAIL).floor() as i64
    }
}

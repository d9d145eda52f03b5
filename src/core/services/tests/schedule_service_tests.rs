use chrono::{Duration, NaiveDate};

use crate::book::{LineItem, Project, RoundingUnit};
use crate::catalog::ROSTER;
use crate::core::services::ScheduleService;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
}

fn estimate_item(category: &str, amount: f64) -> LineItem {
    let mut item = LineItem::new(category, "scope");
    item.quantity = 1.0;
    item.material_unit_price = amount;
    item
}

fn project_with(categories: &[(&str, f64)]) -> Project {
    let mut project = Project::new("Schedule", start());
    project.rounding_unit = RoundingUnit::None;
    for (category, amount) in categories {
        project.add_line_item(estimate_item(category, *amount));
    }
    project
}

#[test]
fn same_group_successor_starts_inside_the_previous_tail() {
    // Plumbing and Electrical share a group and a 4-day base; equal
    // subtotals scale both to 5 days, so the second task starts 3 days
    // in and the pair spans 8 days rather than 10.
    let project = project_with(&[("C05", 10_000.0), ("C06", 10_000.0)]);
    let synthesis = ScheduleService::synthesize(&project);

    assert_eq!(synthesis.tasks.len(), 2);
    let first = &synthesis.tasks[0];
    let second = &synthesis.tasks[1];
    assert_eq!(first.start, start());
    assert_eq!(first.duration_days(), 5);
    assert_eq!(second.start, start() + Duration::days(3));
    assert_eq!(second.duration_days(), 5);
    assert_eq!(synthesis.total_days, 8);
}

#[test]
fn categories_outside_a_group_queue_strictly() {
    let project = project_with(&[("C03", 5_000.0), ("C04", 5_000.0)]);
    let synthesis = ScheduleService::synthesize(&project);

    let first = &synthesis.tasks[0];
    let second = &synthesis.tasks[1];
    assert_eq!(second.start, first.end);
    assert_eq!(
        synthesis.total_days,
        first.duration_days() + second.duration_days()
    );
}

#[test]
fn a_new_group_does_not_overlap_the_previous_one() {
    let project = project_with(&[("C02", 8_000.0), ("C05", 8_000.0)]);
    let synthesis = ScheduleService::synthesize(&project);

    let structural = &synthesis.tasks[0];
    let plumbing = &synthesis.tasks[1];
    assert_eq!(plumbing.start, structural.end);
}

#[test]
fn every_task_ends_on_or_after_its_start() {
    let project = project_with(&[
        ("C01", 3_000.0),
        ("C02", 12_000.0),
        ("C05", 2_000.0),
        ("C06", 1_500.0),
        ("C09", 9_000.0),
        ("C18", 400.0),
    ]);
    let synthesis = ScheduleService::synthesize(&project);
    assert_eq!(synthesis.tasks.len(), 6);
    assert!(synthesis.tasks.iter().all(|task| task.end >= task.start));
}

#[test]
fn tasks_follow_the_construction_sequence() {
    let project = project_with(&[("C18", 1_000.0), ("C01", 1_000.0), ("C09", 1_000.0)]);
    let ids: Vec<String> = ScheduleService::synthesize(&project)
        .tasks
        .into_iter()
        .map(|task| task.category_id)
        .collect();
    assert_eq!(ids, vec!["C01", "C09", "C18"]);
}

#[test]
fn empty_or_zero_estimates_synthesize_nothing() {
    let empty = project_with(&[]);
    let synthesis = ScheduleService::synthesize(&empty);
    assert!(synthesis.tasks.is_empty());
    assert_eq!(synthesis.total_days, 0);

    let zeroed = project_with(&[("C05", 0.0)]);
    assert!(ScheduleService::synthesize(&zeroed).tasks.is_empty());
}

#[test]
fn cheap_categories_still_get_the_minimum_duration() {
    // Signage base is 2 days; a near-zero cost ratio would scale it
    // toward 1 day but the floor holds at 2.
    let project = project_with(&[("C02", 1_000_000.0), ("C17", 1.0)]);
    let synthesis = ScheduleService::synthesize(&project);
    let signage = synthesis
        .tasks
        .iter()
        .find(|task| task.category_id == "C17")
        .unwrap();
    assert_eq!(signage.duration_days(), 2);
}

#[test]
fn floor_area_multipliers_compound() {
    // Masonry alone: ratio 1 gives round(6 * 1.2) = 7 days. Over 50
    // area units that becomes 8; over 100 the 1.4 gate also fires: 11.
    let mut project = project_with(&[("C03", 5_000.0)]);
    assert_eq!(ScheduleService::synthesize(&project).tasks[0].duration_days(), 7);

    project.floor_area = 80.0;
    assert_eq!(ScheduleService::synthesize(&project).tasks[0].duration_days(), 8);

    project.floor_area = 120.0;
    assert_eq!(ScheduleService::synthesize(&project).tasks[0].duration_days(), 11);
}

#[test]
fn assignees_rotate_round_robin_over_the_roster() {
    let project = project_with(&[
        ("C01", 1_000.0),
        ("C03", 1_000.0),
        ("C05", 1_000.0),
        ("C08", 1_000.0),
        ("C12", 1_000.0),
        ("C18", 1_000.0),
    ]);
    let tasks = ScheduleService::synthesize(&project).tasks;
    assert_eq!(tasks[0].assignee, ROSTER[0]);
    assert_eq!(tasks[4].assignee, ROSTER[4]);
    assert_eq!(tasks[5].assignee, ROSTER[0]);
}

#[test]
fn notes_summarize_item_count_and_estimate() {
    let mut project = project_with(&[("C05", 700.0)]);
    project.add_line_item(estimate_item("C05", 300.0));
    let tasks = ScheduleService::synthesize(&project).tasks;
    assert_eq!(tasks[0].note, "2 items, estimate 1000");
}

#[test]
fn regenerate_discards_any_previous_schedule() {
    let mut project = project_with(&[("C05", 10_000.0), ("C06", 10_000.0)]);
    let first = ScheduleService::regenerate(&mut project);
    assert_eq!(project.schedule_tasks.len(), 2);

    // Simulate a hand edit, then regenerate: the edit is gone.
    project.schedule_tasks[0].progress = 75.0;
    project.schedule_tasks[0].note = "edited by hand".into();
    let second = ScheduleService::regenerate(&mut project);
    assert_eq!(second.tasks.len(), first.tasks.len());
    assert_eq!(project.schedule_tasks[0].progress, 0.0);
    assert_ne!(project.schedule_tasks[0].note, "edited by hand");
}

#[test]
fn synthesize_never_mutates_the_project() {
    let project = project_with(&[("C05", 10_000.0)]);
    let before = project.schedule_tasks.len();
    let _ = ScheduleService::synthesize(&project);
    assert_eq!(project.schedule_tasks.len(), before);
}

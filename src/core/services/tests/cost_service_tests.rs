use chrono::NaiveDate;

use crate::book::{LineItem, PaymentMilestone, Project, RoundingUnit, ScheduleTask};
use crate::core::services::CostService;

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
}

fn priced_item(category: &str, quantity: f64, material: f64, labor: f64) -> LineItem {
    let mut item = LineItem::new(category, "work");
    item.quantity = quantity;
    item.material_unit_price = material;
    item.labor_unit_price = labor;
    item
}

fn single_category_project() -> Project {
    let mut project = Project::new("Riverside Office", start_date());
    project.profit_percent = 10.0;
    project.rounding_unit = RoundingUnit::HundredThousand;
    project.add_line_item(priced_item("C01", 10.0, 1_000.0, 500.0));
    project
}

#[test]
fn loads_direct_cost_with_profit_safety_and_meal() {
    let project = single_category_project();
    let cost = CostService::compute_cost(&project);

    assert_eq!(cost.direct_cost, 15_000.0);
    assert!((cost.profit_amount - 1_500.0).abs() < 1e-9);
    assert!((cost.safety_amount - 105.0).abs() < 1e-9);
    assert!((cost.meal_amount - 450.0).abs() < 1e-9);
    assert!((cost.indirect - 2_055.0).abs() < 1e-9);
    assert!((cost.raw_total - 17_055.0).abs() < 1e-9);
}

#[test]
fn hundred_thousand_floor_can_reach_zero() {
    // A raw total below one rounding unit floors all the way to zero;
    // the policy floors, it never rounds up.
    let project = single_category_project();
    let cost = CostService::compute_cost(&project);

    assert_eq!(cost.final_total, 0.0);
    assert!(cost.rounding_adjustment <= 0.0);
    assert!((cost.rounding_adjustment + cost.raw_total).abs() < 1e-9);
}

#[test]
fn ten_thousand_floor_keeps_the_lower_denomination() {
    let mut project = single_category_project();
    project.rounding_unit = RoundingUnit::TenThousand;
    let cost = CostService::compute_cost(&project);

    assert_eq!(cost.final_total, 10_000.0);
    assert_eq!(cost.final_total % 10_000.0, 0.0);
    assert!(cost.final_total <= cost.raw_total);
}

#[test]
fn compute_cost_is_idempotent() {
    let project = single_category_project();
    let first = CostService::compute_cost(&project);
    let second = CostService::compute_cost(&project);
    assert_eq!(first, second);
}

#[test]
fn raising_a_quantity_never_lowers_direct_cost() {
    let mut project = single_category_project();
    let before = CostService::compute_cost(&project).direct_cost;
    project.line_items[0].quantity += 5.0;
    let after = CostService::compute_cost(&project).direct_cost;
    assert!(after >= before);
}

#[test]
fn manual_zero_falls_back_to_raw_total() {
    let mut project = single_category_project();
    project.rounding_unit = RoundingUnit::Manual;
    project.manual_total = 0.0;
    let cost = CostService::compute_cost(&project);
    assert_eq!(cost.final_total, cost.raw_total);
}

#[test]
fn negative_manual_override_passes_through() {
    let mut project = single_category_project();
    project.rounding_unit = RoundingUnit::Manual;
    project.manual_total = -5_000.0;
    let cost = CostService::compute_cost(&project);
    assert_eq!(cost.final_total, -5_000.0);
    // A non-positive contract total collapses every ratio to zero.
    assert_eq!(CostService::margin_percent(&project), 0.0);
    assert_eq!(CostService::collection_rate(&project), 0.0);
}

#[test]
fn cost_side_ignores_the_sale_scale_factor() {
    let mut project = Project::new("Scale Check", start_date());
    project.rounding_unit = RoundingUnit::None;
    project.profit_percent = 0.0;
    let mut item = priced_item("C03", 4.0, 250.0, 0.0);
    item.scale_factor = 3.0;
    item.cost_material_unit_price = 200.0;
    project.add_line_item(item);

    let cost = CostService::compute_cost(&project);
    assert_eq!(cost.direct_cost, 3_000.0);
    assert_eq!(cost.cost_direct, 800.0);
}

#[test]
fn categories_come_out_in_construction_sequence_order() {
    let mut project = Project::new("Ordering", start_date());
    project.add_line_item(priced_item("C11", 1.0, 10.0, 0.0));
    project.add_line_item(priced_item("C01", 1.0, 10.0, 0.0));
    project.add_line_item(priced_item("C05", 1.0, 10.0, 0.0));

    let ids: Vec<String> = CostService::compute_cost(&project)
        .categories
        .into_iter()
        .map(|c| c.category_id)
        .collect();
    assert_eq!(ids, vec!["C01", "C05", "C11"]);
}

#[test]
fn collected_and_outstanding_split_the_contract_total() {
    let mut project = Project::new("Collections", start_date());
    project.rounding_unit = RoundingUnit::None;
    project.profit_percent = 0.0;
    project.add_line_item(priced_item("C02", 1.0, 100_000.0, 0.0));
    project.add_milestone(PaymentMilestone::new("Down payment", 30.0));
    project.add_milestone(PaymentMilestone::new("Completion", 70.0));
    project.payment_schedule[0].mark_paid(start_date());

    let final_total = CostService::contract_total(&project);
    let collected = CostService::collected_amount(&project);
    assert!((collected - final_total * 0.3).abs() < 1e-9);
    assert!(
        (CostService::outstanding_amount(&project) - final_total * 0.7).abs() < 1e-9
    );
    assert!((CostService::collection_rate(&project) - 30.0).abs() < 1e-9);
}

#[test]
fn schedule_progress_averages_task_progress() {
    let mut project = Project::new("Progress", start_date());
    assert_eq!(CostService::schedule_progress(&project), 0.0);

    for (idx, progress) in [0.0, 50.0, 100.0].into_iter().enumerate() {
        project.schedule_tasks.push(ScheduleTask {
            id: uuid::Uuid::new_v4(),
            category_id: format!("C0{}", idx + 1),
            name: format!("Task {idx}"),
            start: start_date(),
            end: start_date(),
            assignee: "Chen".into(),
            note: String::new(),
            progress,
        });
    }
    assert!((CostService::schedule_progress(&project) - 50.0).abs() < 1e-9);
}

#[test]
fn empty_estimate_produces_all_zeros() {
    let mut project = Project::new("Empty", start_date());
    project.rounding_unit = RoundingUnit::None;
    let cost = CostService::compute_cost(&project);
    assert!(cost.categories.is_empty());
    assert_eq!(cost.direct_cost, 0.0);
    assert_eq!(cost.final_total, 0.0);
    assert_eq!(CostService::margin_percent(&project), 0.0);
}

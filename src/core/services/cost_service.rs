//! Estimate cost rollup: line items to category subtotals to a loaded and
//! rounded contract total.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::book::{Project, RoundingUnit};
use crate::catalog;

/// Site-safety allowance, as a fraction of direct cost.
const SAFETY_RATE: f64 = 0.007;
/// Crew meal allowance, as a fraction of direct cost.
const MEAL_RATE: f64 = 0.03;

/// Accumulated sell- and cost-side amounts for one trade category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryCost {
    pub category_id: String,
    pub name: String,
    pub item_count: usize,
    pub material: f64,
    pub labor: f64,
    pub expense: f64,
    pub subtotal: f64,
    pub cost_material: f64,
    pub cost_labor: f64,
    pub cost_expense: f64,
    pub cost_subtotal: f64,
}

impl CategoryCost {
    fn empty(category_id: &str) -> Self {
        Self {
            category_id: category_id.to_string(),
            name: catalog::display_name(category_id).to_string(),
            item_count: 0,
            material: 0.0,
            labor: 0.0,
            expense: 0.0,
            subtotal: 0.0,
            cost_material: 0.0,
            cost_labor: 0.0,
            cost_expense: 0.0,
            cost_subtotal: 0.0,
        }
    }
}

/// Full cost breakdown of one project estimate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CostResult {
    /// Per-category subtotals in construction-sequence order.
    pub categories: Vec<CategoryCost>,
    pub direct_cost: f64,
    pub cost_direct: f64,
    pub profit_amount: f64,
    pub safety_amount: f64,
    pub meal_amount: f64,
    pub indirect: f64,
    pub raw_total: f64,
    pub final_total: f64,
    /// `final_total - raw_total`; non-positive for the floor policies.
    pub rounding_adjustment: f64,
}

/// Stateless estimating arithmetic over [`Project`] snapshots.
///
/// Every function is total: degenerate input produces zeros, never an
/// error or a panic.
pub struct CostService;

impl CostService {
    /// Rolls a project's line items up into the full cost breakdown.
    pub fn compute_cost(project: &Project) -> CostResult {
        let mut by_category: HashMap<String, CategoryCost> = HashMap::new();

        for item in &project.line_items {
            let entry = by_category
                .entry(item.category_id.clone())
                .or_insert_with(|| CategoryCost::empty(&item.category_id));
            entry.item_count += 1;
            entry.material += item.sell_material();
            entry.labor += item.sell_labor();
            entry.expense += item.sell_expense();
            // Cost side ignores the sale-side scale factor; see LineItem.
            entry.cost_material += item.cost_material();
            entry.cost_labor += item.cost_labor();
            entry.cost_expense += item.cost_expense();
        }

        let mut categories: Vec<CategoryCost> = by_category.into_values().collect();
        for category in &mut categories {
            category.subtotal = category.material + category.labor + category.expense;
            category.cost_subtotal =
                category.cost_material + category.cost_labor + category.cost_expense;
        }
        // Known categories in construction-sequence order, unknown ids after.
        categories.sort_by(|a, b| {
            let rank_a = catalog::sequence_index(&a.category_id);
            let rank_b = catalog::sequence_index(&b.category_id);
            match (rank_a, rank_b) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => a.category_id.cmp(&b.category_id),
            }
        });

        let direct_cost: f64 = categories.iter().map(|c| c.subtotal).sum();
        let cost_direct: f64 = categories.iter().map(|c| c.cost_subtotal).sum();

        let profit_amount = direct_cost * project.profit_percent / 100.0;
        let safety_amount = direct_cost * SAFETY_RATE;
        let meal_amount = direct_cost * MEAL_RATE;
        let indirect = profit_amount + safety_amount + meal_amount;
        let raw_total = direct_cost + indirect;

        let final_total = match project.rounding_unit {
            RoundingUnit::Manual => {
                // A manual total of exactly 0 means "unset".
                if project.manual_total == 0.0 {
                    raw_total
                } else {
                    project.manual_total
                }
            }
            unit => match unit.denomination() {
                Some(denomination) => floor_to(raw_total, denomination),
                None => raw_total,
            },
        };

        CostResult {
            categories,
            direct_cost,
            cost_direct,
            profit_amount,
            safety_amount,
            meal_amount,
            indirect,
            raw_total,
            final_total,
            rounding_adjustment: final_total - raw_total,
        }
    }

    /// The rounded (or manually overridden) contract total.
    pub fn contract_total(project: &Project) -> f64 {
        Self::compute_cost(project).final_total
    }

    /// Estimated margin against cost-side direct cost, in percent.
    pub fn margin_percent(project: &Project) -> f64 {
        let cost = Self::compute_cost(project);
        if cost.final_total <= 0.0 {
            return 0.0;
        }
        (cost.final_total - cost.cost_direct) / cost.final_total * 100.0
    }

    /// Arithmetic mean of task progress; 0 when no schedule exists.
    pub fn schedule_progress(project: &Project) -> f64 {
        if project.schedule_tasks.is_empty() {
            return 0.0;
        }
        let total: f64 = project.schedule_tasks.iter().map(|t| t.progress).sum();
        total / project.schedule_tasks.len() as f64
    }

    /// Cash received: paid milestones applied to the contract total.
    pub fn collected_amount(project: &Project) -> f64 {
        let final_total = Self::contract_total(project);
        project
            .payment_schedule
            .iter()
            .filter(|m| m.paid)
            .map(|m| final_total * m.percent_of_total / 100.0)
            .sum()
    }

    /// Cash still owed against the contract total.
    pub fn outstanding_amount(project: &Project) -> f64 {
        Self::contract_total(project) - Self::collected_amount(project)
    }

    /// Collected share of the contract total, in percent.
    pub fn collection_rate(project: &Project) -> f64 {
        let final_total = Self::contract_total(project);
        if final_total <= 0.0 {
            return 0.0;
        }
        Self::collected_amount(project) / final_total * 100.0
    }
}

fn floor_to(value: f64, denomination: f64) -> f64 {
    (value / denomination).floor() * denomination
}

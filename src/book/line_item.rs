use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One priced scope-of-work entry on a project estimate.
///
/// Every numeric field defaults to zero when absent from stored JSON;
/// negative values are accepted and propagate arithmetically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub id: Uuid,
    /// Catalog id of the trade category, e.g. `"C05"`.
    pub category_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub quantity: f64,
    /// Sale-side lot-scaling multiplier. Applies to sell amounts only.
    #[serde(default = "LineItem::default_scale")]
    pub scale_factor: f64,
    #[serde(default)]
    pub material_unit_price: f64,
    #[serde(default)]
    pub labor_unit_price: f64,
    #[serde(default)]
    pub expense_unit_price: f64,
    #[serde(default)]
    pub cost_material_unit_price: f64,
    #[serde(default)]
    pub cost_labor_unit_price: f64,
    #[serde(default)]
    pub cost_expense_unit_price: f64,
}

impl LineItem {
    pub fn new(category_id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            category_id: category_id.into(),
            description: description.into(),
            quantity: 0.0,
            scale_factor: 1.0,
            material_unit_price: 0.0,
            labor_unit_price: 0.0,
            expense_unit_price: 0.0,
            cost_material_unit_price: 0.0,
            cost_labor_unit_price: 0.0,
            cost_expense_unit_price: 0.0,
        }
    }

    pub fn default_scale() -> f64 {
        1.0
    }

    pub fn sell_material(&self) -> f64 {
        self.quantity * self.scale_factor * self.material_unit_price
    }

    pub fn sell_labor(&self) -> f64 {
        self.quantity * self.scale_factor * self.labor_unit_price
    }

    pub fn sell_expense(&self) -> f64 {
        self.quantity * self.scale_factor * self.expense_unit_price
    }

    // Cost-side amounts deliberately ignore `scale_factor`: the scale
    // factor is a sale-side markup lever, while cost unit prices track
    // what the work actually costs.
    pub fn cost_material(&self) -> f64 {
        self.quantity * self.cost_material_unit_price
    }

    pub fn cost_labor(&self) -> f64 {
        self.quantity * self.cost_labor_unit_price
    }

    pub fn cost_expense(&self) -> f64 {
        self.quantity * self.cost_expense_unit_price
    }
}

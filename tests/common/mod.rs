use chrono::NaiveDate;
use site_core::book::{
    ApprovalStatus, ExpenseEntry, LaborEntry, LineItem, PaymentMilestone, Project, ProjectBook,
    PurchaseOrder, RoundingUnit,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn priced_item(category: &str, quantity: f64, material: f64, labor: f64) -> LineItem {
    let mut item = LineItem::new(category, "scope of work");
    item.quantity = quantity;
    item.material_unit_price = material;
    item.labor_unit_price = labor;
    item.cost_material_unit_price = material * 0.8;
    item.cost_labor_unit_price = labor * 0.8;
    item
}

/// One book with a fitted-out project and a handful of ledger rows, the
/// shape a real site office would store.
pub fn sample_book() -> ProjectBook {
    let mut book = ProjectBook::new("Riverside Portfolio");

    let mut project = Project::new("Riverside Office", date(2025, 3, 3));
    project.client = Some("Hargrove Ltd".into());
    project.floor_area = 64.0;
    project.profit_percent = 10.0;
    project.rounding_unit = RoundingUnit::HundredThousand;
    project.add_line_item(priced_item("C01", 10.0, 20_000.0, 5_000.0));
    project.add_line_item(priced_item("C02", 4.0, 120_000.0, 40_000.0));
    project.add_line_item(priced_item("C05", 6.0, 15_000.0, 9_000.0));
    project.add_line_item(priced_item("C11", 20.0, 3_000.0, 2_000.0));
    let mut down_payment = PaymentMilestone::new("Down payment", 30.0);
    down_payment.mark_paid(date(2025, 3, 10));
    project.add_milestone(down_payment);
    project.add_milestone(PaymentMilestone::new("Completion", 70.0));
    let project_id = book.add_project(project);

    book.add_purchase_order(PurchaseOrder::new(
        project_id,
        "Hanmir Steel",
        46_000.0,
        date(2025, 3, 12),
    ));
    let mut crew = LaborEntry::new(project_id, "Chen");
    crew.daily_rate = 1_800.0;
    crew.days = 12.0;
    crew.meal_cost = 900.0;
    crew.paid = true;
    crew.paid_date = Some(date(2025, 3, 28));
    book.add_labor_entry(crew);
    let mut expense = ExpenseEntry::new(project_id, "Waste disposal", 5_400.0, date(2025, 3, 14));
    expense.status = ApprovalStatus::Approved;
    book.add_expense(expense);

    book
}

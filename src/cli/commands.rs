use crate::{
    book::{MonthKey, Project, ProjectBook},
    config::AppConfig,
    core::{CashflowService, CostService, FinanceService, ScheduleService},
    errors::{Result, SiteError},
    storage::{book_warnings, JsonStorage, StorageBackend},
};

use super::output;

const USAGE: &str = "\
Usage: site_core_cli <command> [args]

Commands:
  list                                  List stored project books
  summary  <book> <project>             Estimate cost breakdown
  finance  <book> <project>             Financial reconciliation
  cashflow <book> <YYYY-MM> <months>    Monthly cash-flow table
  schedule <book> <project> [--apply]   Synthesize a schedule
  help                                  Show this help
  version                               Show the version";

/// Entry point for the argv-style CLI dispatch.
pub fn run(args: &[String]) -> Result<()> {
    let command = args.first().map(String::as_str).unwrap_or("help");
    match command {
        "help" | "--help" | "-h" => {
            println!("{USAGE}");
            Ok(())
        }
        "version" | "--version" => {
            println!("site_core {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "list" => cmd_list(),
        "summary" => {
            let (book, project) = two_args(args, "summary <book> <project>")?;
            cmd_summary(&book, &project)
        }
        "finance" => {
            let (book, project) = two_args(args, "finance <book> <project>")?;
            cmd_finance(&book, &project)
        }
        "cashflow" => {
            let (book, month) = two_args(args, "cashflow <book> <YYYY-MM> <months>")?;
            let months: usize = args
                .get(3)
                .and_then(|raw| raw.parse().ok())
                .ok_or_else(|| SiteError::InvalidInput("expected a month count".into()))?;
            cmd_cashflow(&book, &month, months)
        }
        "schedule" => {
            let (book, project) = two_args(args, "schedule <book> <project> [--apply]")?;
            let apply = args.iter().any(|arg| arg == "--apply");
            cmd_schedule(&book, &project, apply)
        }
        other => Err(SiteError::InvalidInput(format!(
            "unknown command `{other}`; run `site_core_cli help`"
        ))),
    }
}

fn two_args(args: &[String], usage: &str) -> Result<(String, String)> {
    match (args.get(1), args.get(2)) {
        (Some(a), Some(b)) => Ok((a.clone(), b.clone())),
        _ => Err(SiteError::InvalidInput(format!("usage: {usage}"))),
    }
}

fn open_storage() -> Result<JsonStorage> {
    let config = AppConfig::load_or_default();
    JsonStorage::new(config.data_dir.clone(), Some(config.backup_retention))
}

fn load_book(storage: &JsonStorage, name: &str) -> Result<ProjectBook> {
    let book = storage.load(name)?;
    for warning in book_warnings(&book) {
        output::warn(warning);
    }
    storage.record_last_book(Some(name))?;
    Ok(book)
}

fn find_project<'a>(book: &'a ProjectBook, name: &str) -> Result<&'a Project> {
    book.project_by_name(name)
        .ok_or_else(|| SiteError::ProjectNotFound(name.to_string()))
}

fn cmd_list() -> Result<()> {
    let storage = open_storage()?;
    let books = storage.list_books()?;
    if books.is_empty() {
        output::info("no books stored yet");
        return Ok(());
    }
    for name in books {
        println!("{name}");
    }
    Ok(())
}

fn cmd_summary(book_name: &str, project_name: &str) -> Result<()> {
    let storage = open_storage()?;
    let book = load_book(&storage, book_name)?;
    let project = find_project(&book, project_name)?;
    let cost = CostService::compute_cost(project);

    output::section(format!("Estimate: {}", project.name));
    for category in &cost.categories {
        println!(
            "  {:<14} {:>14}  (cost {:>14})  {} items",
            category.name,
            output::format_money(category.subtotal),
            output::format_money(category.cost_subtotal),
            category.item_count,
        );
    }
    println!("  {:<14} {:>14}", "Direct", output::format_money(cost.direct_cost));
    println!(
        "  {:<14} {:>14}  (profit {} / safety {} / meal {})",
        "Indirect",
        output::format_money(cost.indirect),
        output::format_money(cost.profit_amount),
        output::format_money(cost.safety_amount),
        output::format_money(cost.meal_amount),
    );
    println!("  {:<14} {:>14}", "Raw total", output::format_money(cost.raw_total));
    println!(
        "  {:<14} {:>14}  (adjustment {})",
        "Contract",
        output::format_money(cost.final_total),
        output::format_money(cost.rounding_adjustment),
    );
    println!(
        "  {:<14} {:>14}",
        "Margin",
        output::format_percent(CostService::margin_percent(project)),
    );
    if !project.schedule_tasks.is_empty() {
        println!(
            "  {:<14} {:>14}",
            "Progress",
            output::format_percent(CostService::schedule_progress(project)),
        );
    }
    Ok(())
}

fn cmd_finance(book_name: &str, project_name: &str) -> Result<()> {
    let storage = open_storage()?;
    let book = load_book(&storage, book_name)?;
    let project = find_project(&book, project_name)?;
    let summary = FinanceService::summarize(project, &book.ledger());

    output::section(format!("Finance: {}", project.name));
    println!("  Contract      {:>14}", output::format_money(summary.contract_total));
    println!(
        "  Spent         {:>14}  (orders {} / labor {} / expenses {})",
        output::format_money(summary.total_spent),
        output::format_money(summary.actual_order_cost),
        output::format_money(summary.actual_labor_cost),
        output::format_money(summary.actual_expense_cost),
    );
    println!(
        "  Profit        {:>14}  (margin {})",
        output::format_money(summary.actual_profit),
        output::format_percent(summary.actual_margin),
    );
    println!("  Execution     {:>14}", output::format_percent(summary.execution_rate));
    println!(
        "  Collected     {:>14}  ({} of contract, {} outstanding)",
        output::format_money(summary.collected),
        output::format_percent(summary.collection_rate),
        output::format_money(summary.outstanding),
    );
    Ok(())
}

fn cmd_cashflow(book_name: &str, month_label: &str, months: usize) -> Result<()> {
    let month = MonthKey::parse(month_label)
        .ok_or_else(|| SiteError::InvalidInput(format!("invalid month `{month_label}`")))?;
    let storage = open_storage()?;
    let book = load_book(&storage, book_name)?;
    let series = CashflowService::aggregate_months(&book.projects, &book.ledger(), month, months);

    output::section(format!("Cash flow: {}", book.name));
    println!(
        "  {:<8} {:>14} {:>14} {:>14} {:>14}",
        "Month", "Revenue", "Spend", "Net", "Cumulative"
    );
    let mut running = 0.0;
    for bucket in &series {
        let spend = bucket.order_spend + bucket.labor_spend + bucket.expense_spend;
        running += bucket.net;
        println!(
            "  {:<8} {:>14} {:>14} {:>14} {:>14}",
            bucket.month.to_string(),
            output::format_money(bucket.revenue),
            output::format_money(spend),
            output::format_money(bucket.net),
            output::format_money(running),
        );
    }
    Ok(())
}

fn cmd_schedule(book_name: &str, project_name: &str, apply: bool) -> Result<()> {
    let storage = open_storage()?;
    let mut book = load_book(&storage, book_name)?;
    let project_id = find_project(&book, project_name)?.id;

    let synthesis = if apply {
        let project = book
            .project_mut(project_id)
            .ok_or_else(|| SiteError::ProjectNotFound(project_name.to_string()))?;
        // Full replace: any hand-edited tasks are discarded.
        let synthesis = ScheduleService::regenerate(project);
        storage.save(&book, book_name)?;
        output::success("schedule applied and book saved");
        synthesis
    } else {
        let project = book
            .project(project_id)
            .ok_or_else(|| SiteError::ProjectNotFound(project_name.to_string()))?;
        ScheduleService::synthesize(project)
    };

    if synthesis.tasks.is_empty() {
        output::info("estimate has no active categories; nothing to schedule");
        return Ok(());
    }

    output::section(format!("Schedule: {project_name}"));
    for task in &synthesis.tasks {
        println!(
            "  {:<14} {} -> {}  {:>3}d  {:<8} {}",
            task.name,
            task.start,
            task.end,
            task.duration_days(),
            task.assignee,
            task.note,
        );
    }
    output::info(format!("total span {} days", synthesis.total_days));
    Ok(())
}

use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{format_money, format_percent, section};
use crate::cli::registry::CommandEntry;
use crate::core::services::SummaryService;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "summary",
        "Show income, spending, budgets, goals and bills at a glance",
        "summary",
        cmd_summary,
    )]
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let snapshot = context.store.snapshot();
    let currency = context.currency();
    let totals = SummaryService::totals(snapshot);

    section("Overview");
    io::print_info(format!("  Income       : {}", format_money(totals.total_income, currency)));
    io::print_info(format!("  Expenses     : {}", format_money(totals.total_expenses, currency)));
    io::print_info(format!("  Net worth    : {}", format_money(totals.net_worth, currency)));
    io::print_info(format!(
        "  Budget used  : {} of {} ({})",
        format_money(totals.total_spent, currency),
        format_money(totals.total_budget, currency),
        format_percent(totals.budget_used_percent)
    ));
    io::print_info(format!(
        "  Portfolio    : {} (gain/loss {})",
        format_money(totals.portfolio.value, currency),
        format_money(totals.portfolio.gain_loss, currency)
    ));

    let over: Vec<_> = SummaryService::budget_usage(snapshot)
        .into_iter()
        .filter(|usage| usage.is_over_budget())
        .map(|usage| usage.category)
        .collect();
    if !over.is_empty() {
        io::print_warning(format!("Over budget: {}", over.join(", ")));
    }

    let goals = SummaryService::goal_progress(snapshot, context.store.today());
    if !goals.is_empty() {
        section("Goals");
        for goal in goals {
            io::print_info(format!(
                "  {:<20} {} ({} remaining)",
                goal.name,
                format_percent(goal.percent),
                format_money(goal.remaining, currency)
            ));
        }
    }

    let bills = SummaryService::bill_totals(snapshot);
    if !bills.total.is_zero() {
        io::print_info(format!(
            "  Bills pending: {}",
            format_money(bills.pending + bills.overdue, currency)
        ));
    }
    Ok(())
}

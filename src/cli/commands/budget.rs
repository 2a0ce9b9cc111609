use uuid::Uuid;

use crate::cli::core::{
    parse_amount, resolve_record, CommandError, CommandResult, ParsedArgs, ShellContext,
};
use crate::cli::icons::category_icon;
use crate::cli::io;
use crate::cli::output::{format_money, format_percent, render_table, section};
use crate::cli::registry::CommandEntry;
use crate::core::services::BudgetService;
use crate::ledger::BudgetPatch;

const USAGE: &str = "budget <add|edit|delete|list>";
const ADD_USAGE: &str = "budget add <category> <allocated>";
const EDIT_USAGE: &str = "budget edit <#> [--category C] [--allocated N]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "budget",
        "Manage category budgets",
        USAGE,
        cmd_budget,
    )]
}

fn cmd_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return handle_list(context);
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "add" => handle_add(context, rest),
        "edit" => handle_edit(context, rest),
        "delete" | "remove" => handle_delete(context, rest),
        "list" => handle_list(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown budget subcommand `{}`",
            other
        ))),
    }
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[])?;
    let category = context.arg_or_prompt(&parsed.positional, 0, "Category", ADD_USAGE)?;
    let allocated =
        parse_amount(&context.arg_or_prompt(&parsed.positional, 1, "Allocated", ADD_USAGE)?)?;
    context.store.add_budget(&category, allocated)?;
    io::print_success(format!("Budget created for {}.", category.trim()));
    Ok(())
}

fn handle_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[])?;
    let reference = context.arg_or_prompt(&parsed.positional, 0, "Budget #", EDIT_USAGE)?;
    let id = resolve_record(&reference, &budget_ids(context), "budget")?;
    let patch = BudgetPatch {
        category: parsed.option("category").map(str::to_string),
        allocated: parsed.option("allocated").map(parse_amount).transpose()?,
    };
    if patch == BudgetPatch::default() {
        return Err(CommandError::InvalidArguments(format!("usage: {EDIT_USAGE}")));
    }
    context.store.update_budget(id, patch)?;
    io::print_success("Budget updated.");
    Ok(())
}

fn handle_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(reference) = args.first() else {
        return Err(CommandError::InvalidArguments("usage: budget delete <#>".into()));
    };
    let id = resolve_record(reference, &budget_ids(context), "budget")?;
    if !context.confirm("Delete this budget?")? {
        io::print_info("Deletion cancelled.");
        return Ok(());
    }
    if context.store.delete_budget(id) {
        io::print_success("Budget deleted.");
    } else {
        io::print_warning("Budget not found.");
    }
    Ok(())
}

fn handle_list(context: &mut ShellContext) -> CommandResult {
    let usage = BudgetService::usage(context.store.snapshot());
    if usage.is_empty() {
        io::print_warning("No budgets defined.");
        return Ok(());
    }
    let currency = context.currency();
    let rows: Vec<Vec<String>> = usage
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            vec![
                (idx + 1).to_string(),
                format!("{} {}", category_icon(&item.category), item.category),
                format_money(item.spent, currency),
                format_money(item.allocated, currency),
                format_money(item.remaining, currency),
                format_percent(item.percent_used),
                item.status.to_string(),
            ]
        })
        .collect();
    section("Budgets");
    render_table(
        &["#", "Category", "Spent", "Allocated", "Remaining", "Used", "Status"],
        &rows,
    );
    for item in usage.iter().filter(|item| item.is_over_budget()) {
        io::print_warning(format!(
            "{} is over budget by {}",
            item.category,
            format_money(-item.remaining, currency)
        ));
    }
    Ok(())
}

fn budget_ids(context: &ShellContext) -> Vec<Uuid> {
    context
        .store
        .snapshot()
        .budgets
        .iter()
        .map(|budget| budget.id)
        .collect()
}

use uuid::Uuid;

use crate::cli::core::{
    parse_amount, parse_date, parse_enum, resolve_record, CommandError, CommandResult,
    ParsedArgs, ShellContext,
};
use crate::cli::io;
use crate::cli::output::{format_money, format_percent, render_table, section};
use crate::cli::registry::CommandEntry;
use crate::core::services::GoalService;
use crate::ledger::{GoalPriority, NewGoal};

const USAGE: &str = "goal <add|contribute|delete|list>";
const ADD_USAGE: &str = "goal add <name> <target> <deadline YYYY-MM-DD> [--category C] [--priority high|medium|low] [--description D]";
const CONTRIBUTE_USAGE: &str = "goal contribute <#> <amount>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "goal",
        "Track savings goals and contributions",
        USAGE,
        cmd_goal,
    )]
}

fn cmd_goal(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return handle_list(context);
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "add" => handle_add(context, rest),
        "contribute" => handle_contribute(context, rest),
        "delete" | "remove" => handle_delete(context, rest),
        "list" => handle_list(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown goal subcommand `{}`",
            other
        ))),
    }
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[])?;
    let name = context.arg_or_prompt(&parsed.positional, 0, "Name", ADD_USAGE)?;
    let target = parse_amount(&context.arg_or_prompt(&parsed.positional, 1, "Target", ADD_USAGE)?)?;
    let deadline =
        parse_date(&context.arg_or_prompt(&parsed.positional, 2, "Deadline (YYYY-MM-DD)", ADD_USAGE)?)?;

    let mut draft = NewGoal::new(name, target, deadline);
    if let Some(category) = parsed.option("category") {
        draft = draft.category(category);
    }
    if let Some(priority) = parsed.option("priority") {
        draft = draft.priority(parse_enum::<GoalPriority>(priority)?);
    }
    if let Some(description) = parsed.option("description") {
        draft = draft.description(description);
    }
    let label = draft.name.trim().to_string();
    context.store.add_goal(draft)?;
    io::print_success(format!("Goal `{}` created.", label));
    Ok(())
}

fn handle_contribute(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let positional: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
    let reference = context.arg_or_prompt(&positional, 0, "Goal #", CONTRIBUTE_USAGE)?;
    let id = resolve_record(&reference, &goal_ids(context), "goal")?;
    let amount = parse_amount(&context.arg_or_prompt(&positional, 1, "Amount", CONTRIBUTE_USAGE)?)?;

    context.store.contribute_to_goal(id, amount)?;
    let currency = context.currency();
    if let Some(goal) = context.store.snapshot().goal(id) {
        io::print_success(format!(
            "Added {} to {} ({} of {}).",
            format_money(amount, currency),
            goal.name,
            format_money(goal.current, currency),
            format_money(goal.target, currency)
        ));
        if goal.is_funded() {
            io::print_success(format!("Goal `{}` is fully funded!", goal.name));
        }
    }
    Ok(())
}

fn handle_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(reference) = args.first() else {
        return Err(CommandError::InvalidArguments("usage: goal delete <#>".into()));
    };
    let id = resolve_record(reference, &goal_ids(context), "goal")?;
    if !context.confirm("Delete this goal?")? {
        io::print_info("Deletion cancelled.");
        return Ok(());
    }
    if context.store.delete_goal(id) {
        io::print_success("Goal deleted.");
    } else {
        io::print_warning("Goal not found.");
    }
    Ok(())
}

fn handle_list(context: &mut ShellContext) -> CommandResult {
    let snapshot = context.store.snapshot();
    let progress = GoalService::progress(snapshot, context.store.today());
    if progress.is_empty() {
        io::print_warning("No goals yet.");
        return Ok(());
    }
    let currency = context.currency();
    let rows: Vec<Vec<String>> = snapshot
        .goals
        .iter()
        .zip(&progress)
        .enumerate()
        .map(|(idx, (goal, item))| {
            let due = if item.is_overdue() {
                "overdue".to_string()
            } else {
                format!("{} days", item.days_left.max(0))
            };
            vec![
                (idx + 1).to_string(),
                goal.name.clone(),
                goal.priority.to_string(),
                format_money(item.current, currency),
                format_money(item.target, currency),
                format_percent(item.percent),
                goal.deadline.to_string(),
                due,
            ]
        })
        .collect();
    section("Goals");
    render_table(
        &["#", "Name", "Priority", "Saved", "Target", "Progress", "Deadline", "Left"],
        &rows,
    );
    Ok(())
}

fn goal_ids(context: &ShellContext) -> Vec<Uuid> {
    context
        .store
        .snapshot()
        .goals
        .iter()
        .map(|goal| goal.id)
        .collect()
}

use uuid::Uuid;

use crate::cli::core::{
    parse_amount, parse_date, resolve_record, CommandError, CommandResult, ParsedArgs,
    ShellContext,
};
use crate::cli::icons::category_icon;
use crate::cli::io;
use crate::cli::output::{format_money, render_table, section};
use crate::cli::registry::CommandEntry;
use crate::core::services::{BillService, NewBill};

const USAGE: &str = "bill <add|pay|delete|list>";
const ADD_USAGE: &str = "bill add <name> <amount> <due-date YYYY-MM-DD> <category> [--recurring]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "bill",
        "Track and pay bills",
        USAGE,
        cmd_bill,
    )]
}

fn cmd_bill(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return handle_list(context);
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "add" => handle_add(context, rest),
        "pay" => handle_pay(context, rest),
        "delete" | "remove" => handle_delete(context, rest),
        "list" => handle_list(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown bill subcommand `{}`",
            other
        ))),
    }
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["recurring"])?;
    let name = context.arg_or_prompt(&parsed.positional, 0, "Name", ADD_USAGE)?;
    let amount = parse_amount(&context.arg_or_prompt(&parsed.positional, 1, "Amount", ADD_USAGE)?)?;
    let due_date = parse_date(&context.arg_or_prompt(
        &parsed.positional,
        2,
        "Due date (YYYY-MM-DD)",
        ADD_USAGE,
    )?)?;
    let category = context.arg_or_prompt(&parsed.positional, 3, "Category", ADD_USAGE)?;

    let draft = NewBill::new(name, amount, due_date, category).recurring(parsed.has("recurring"));
    let label = draft.name.trim().to_string();
    context.store.add_bill(draft)?;
    io::print_success(format!("Bill `{}` added.", label));
    Ok(())
}

fn handle_pay(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(reference) = args.first() else {
        return Err(CommandError::InvalidArguments("usage: bill pay <#>".into()));
    };
    let id = resolve_record(reference, &bill_ids(context), "bill")?;
    context.store.pay_bill(id)?;
    if let Some(bill) = context.store.snapshot().bill(id) {
        io::print_success(format!(
            "Paid {} ({}).",
            bill.name,
            format_money(bill.amount, context.currency())
        ));
    }
    Ok(())
}

fn handle_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(reference) = args.first() else {
        return Err(CommandError::InvalidArguments("usage: bill delete <#>".into()));
    };
    let id = resolve_record(reference, &bill_ids(context), "bill")?;
    if !context.confirm("Delete this bill?")? {
        io::print_info("Deletion cancelled.");
        return Ok(());
    }
    if context.store.delete_bill(id) {
        io::print_success("Bill deleted.");
    } else {
        io::print_warning("Bill not found.");
    }
    Ok(())
}

fn handle_list(context: &mut ShellContext) -> CommandResult {
    let snapshot = context.store.snapshot();
    if snapshot.bills.is_empty() {
        io::print_warning("No bills tracked.");
        return Ok(());
    }
    let currency = context.currency();
    let rows: Vec<Vec<String>> = snapshot
        .bills
        .iter()
        .enumerate()
        .map(|(idx, bill)| {
            vec![
                (idx + 1).to_string(),
                bill.name.clone(),
                format!("{} {}", category_icon(&bill.category), bill.category),
                format_money(bill.amount, currency),
                bill.due_date.to_string(),
                bill.status.to_string(),
                if bill.recurring { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect();
    section("Bills");
    render_table(
        &["#", "Name", "Category", "Amount", "Due", "Status", "Recurring"],
        &rows,
    );
    let totals = BillService::totals(snapshot);
    io::print_info(format!(
        "Total {}  Paid {}  Pending {}  Overdue {}",
        format_money(totals.total, currency),
        format_money(totals.paid, currency),
        format_money(totals.pending, currency),
        format_money(totals.overdue, currency)
    ));
    Ok(())
}

fn bill_ids(context: &ShellContext) -> Vec<Uuid> {
    context
        .store
        .snapshot()
        .bills
        .iter()
        .map(|bill| bill.id)
        .collect()
}

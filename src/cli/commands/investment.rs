use uuid::Uuid;

use crate::cli::core::{
    parse_amount, resolve_record, CommandError, CommandResult, ParsedArgs, ShellContext,
};
use crate::cli::io;
use crate::cli::output::{format_money, format_percent, render_table, section};
use crate::cli::registry::CommandEntry;
use crate::core::services::{NewInvestment, PortfolioSummary};

const USAGE: &str = "investment <add|delete|list>";
const ADD_USAGE: &str = "investment add <symbol> <name> <shares> <purchase-price>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "investment",
        "Track portfolio positions",
        USAGE,
        cmd_investment,
    )]
}

fn cmd_investment(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return handle_list(context);
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "add" => handle_add(context, rest),
        "delete" | "remove" => handle_delete(context, rest),
        "list" => handle_list(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown investment subcommand `{}`",
            other
        ))),
    }
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[])?;
    let symbol = context.arg_or_prompt(&parsed.positional, 0, "Symbol", ADD_USAGE)?;
    let name = context.arg_or_prompt(&parsed.positional, 1, "Name", ADD_USAGE)?;
    let shares = parse_amount(&context.arg_or_prompt(&parsed.positional, 2, "Shares", ADD_USAGE)?)?;
    let price = parse_amount(&context.arg_or_prompt(
        &parsed.positional,
        3,
        "Purchase price",
        ADD_USAGE,
    )?)?;

    let id = context
        .store
        .add_investment(NewInvestment::new(symbol, name, shares, price))?;
    if let Some(position) = context.store.snapshot().investment(id) {
        io::print_success(format!(
            "Added {} shares of {}.",
            position.shares, position.symbol
        ));
    }
    Ok(())
}

fn handle_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(reference) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: investment delete <#>".into(),
        ));
    };
    let ids: Vec<Uuid> = context
        .store
        .snapshot()
        .investments
        .iter()
        .map(|inv| inv.id)
        .collect();
    let id = resolve_record(reference, &ids, "investment")?;
    if !context.confirm("Delete this investment?")? {
        io::print_info("Deletion cancelled.");
        return Ok(());
    }
    if context.store.delete_investment(id) {
        io::print_success("Investment deleted.");
    } else {
        io::print_warning("Investment not found.");
    }
    Ok(())
}

fn handle_list(context: &mut ShellContext) -> CommandResult {
    let investments = &context.store.snapshot().investments;
    if investments.is_empty() {
        io::print_warning("No investments tracked.");
        return Ok(());
    }
    let currency = context.currency();
    let rows: Vec<Vec<String>> = investments
        .iter()
        .enumerate()
        .map(|(idx, inv)| {
            vec![
                (idx + 1).to_string(),
                inv.symbol.clone(),
                inv.name.clone(),
                inv.shares.normalize().to_string(),
                format_money(inv.current_price, currency),
                format_money(inv.total_value(), currency),
                format!(
                    "{} ({})",
                    format_money(inv.gain_loss(), currency),
                    format_percent(inv.change_percent())
                ),
            ]
        })
        .collect();
    section("Investments");
    render_table(
        &["#", "Symbol", "Name", "Shares", "Price", "Value", "Gain/Loss"],
        &rows,
    );
    let portfolio = PortfolioSummary::from_investments(investments);
    io::print_info(format!(
        "Portfolio value: {}  Gain/Loss: {}",
        format_money(portfolio.value, currency),
        format_money(portfolio.gain_loss, currency)
    ));
    Ok(())
}

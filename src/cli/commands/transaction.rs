use crate::cli::core::{
    parse_amount, parse_date, parse_enum, resolve_record, CommandError, CommandResult,
    ParsedArgs, ShellContext,
};
use crate::cli::icons::category_icon;
use crate::cli::io;
use crate::cli::output::{format_money, render_table, section};
use crate::cli::registry::CommandEntry;
use crate::core::services::TransactionService;
use crate::ledger::{
    parse_tags, NewTransaction, TransactionFilter, TransactionPatch, TransactionType,
};
use uuid::Uuid;

const USAGE: &str = "transaction <add|edit|delete|list>";
const ADD_USAGE: &str =
    "transaction add <amount> <category> <description> [income|expense] [--merchant NAME] [--tags a,b]";
const EDIT_USAGE: &str = "transaction edit <#> [--amount N] [--category C] [--description D] [--type income|expense] [--date YYYY-MM-DD] [--merchant NAME] [--tags a,b]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "transaction",
        "Record, edit and list income and expenses",
        USAGE,
        cmd_transaction,
    )]
}

fn cmd_transaction(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(format!("usage: {USAGE}")));
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "add" => handle_add(context, rest),
        "edit" => handle_edit(context, rest),
        "delete" | "remove" => handle_delete(context, rest),
        "list" => handle_list(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown transaction subcommand `{}`",
            other
        ))),
    }
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[])?;
    let amount = parse_amount(&context.arg_or_prompt(&parsed.positional, 0, "Amount", ADD_USAGE)?)?;
    let category = context.arg_or_prompt(&parsed.positional, 1, "Category", ADD_USAGE)?;
    let description = context.arg_or_prompt(&parsed.positional, 2, "Description", ADD_USAGE)?;
    let kind = match parsed.positional.get(3) {
        Some(raw) => parse_enum::<TransactionType>(raw)?,
        None => TransactionType::Expense,
    };

    let mut draft = NewTransaction {
        amount,
        category,
        description,
        kind,
        ..NewTransaction::default()
    };
    if let Some(merchant) = parsed.option("merchant") {
        draft = draft.with_merchant(merchant);
    }
    if let Some(tags) = parsed.option("tags") {
        draft = draft.with_tags(parse_tags(tags));
    }

    context.store.add_transaction(draft)?;
    io::print_success(format!(
        "Transaction added: {} {}",
        kind,
        format_money(amount, context.currency())
    ));
    Ok(())
}

fn handle_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[])?;
    let reference = context.arg_or_prompt(&parsed.positional, 0, "Transaction #", EDIT_USAGE)?;
    let id = resolve_record(&reference, &transaction_ids(context), "transaction")?;

    let patch = TransactionPatch {
        amount: parsed.option("amount").map(parse_amount).transpose()?,
        category: parsed.option("category").map(str::to_string),
        description: parsed.option("description").map(str::to_string),
        date: parsed.option("date").map(parse_date).transpose()?,
        kind: parsed
            .option("type")
            .map(parse_enum::<TransactionType>)
            .transpose()?,
        merchant: parsed.option("merchant").map(|m| Some(m.to_string())),
        location: parsed.option("location").map(|l| Some(l.to_string())),
        tags: parsed.option("tags").map(parse_tags),
        recurring: None,
    };
    if patch.is_empty() {
        return Err(CommandError::InvalidArguments(format!("usage: {EDIT_USAGE}")));
    }

    context.store.update_transaction(id, patch)?;
    io::print_success("Transaction updated.");
    Ok(())
}

fn handle_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(reference) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: transaction delete <#>".into(),
        ));
    };
    let id = resolve_record(reference, &transaction_ids(context), "transaction")?;
    if !context.confirm("Delete this transaction?")? {
        io::print_info("Deletion cancelled.");
        return Ok(());
    }
    if context.store.delete_transaction(id) {
        io::print_success("Transaction deleted.");
    } else {
        io::print_warning("Transaction not found.");
    }
    Ok(())
}

fn handle_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[])?;
    let mut filter = TransactionFilter::default();
    if let Some(term) = parsed.option("search") {
        filter = filter.search(term);
    }
    if let Some(category) = parsed.option("category") {
        filter = filter.category(category);
    }
    if let Some(kind) = parsed.option("type") {
        filter = filter.kind(parse_enum::<TransactionType>(kind)?);
    }

    let snapshot = context.store.snapshot();
    let currency = context.currency();
    let rows: Vec<Vec<String>> = snapshot
        .transactions
        .iter()
        .enumerate()
        .filter(|(_, txn)| filter.matches(txn))
        .map(|(idx, txn)| {
            let signed = if txn.is_income() {
                format!("+{}", format_money(txn.amount, currency))
            } else {
                format!("-{}", format_money(txn.amount, currency))
            };
            vec![
                (idx + 1).to_string(),
                txn.date.to_string(),
                format!("{} {}", category_icon(&txn.category), txn.category),
                txn.description.clone(),
                txn.merchant.clone().unwrap_or_default(),
                signed,
                txn.tags.join(","),
            ]
        })
        .collect();

    if rows.is_empty() {
        io::print_warning("No transactions match.");
        return Ok(());
    }
    section("Transactions");
    render_table(
        &["#", "Date", "Category", "Description", "Merchant", "Amount", "Tags"],
        &rows,
    );
    let shown = TransactionService::list(snapshot, &filter).len();
    io::print_info(format!("{} of {} transactions", shown, snapshot.transactions.len()));
    Ok(())
}

fn transaction_ids(context: &ShellContext) -> Vec<Uuid> {
    context
        .store
        .snapshot()
        .transactions
        .iter()
        .map(|txn| txn.id)
        .collect()
}

use colored::Colorize;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Hint,
    Section,
}

/// Turns colour codes on or off for everything printed afterwards.
pub fn set_color_enabled(enabled: bool) {
    colored::control::set_override(enabled);
}

fn apply_style(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    match kind {
        MessageKind::Info => text,
        MessageKind::Success => format!("[ok] {text}").bright_green().to_string(),
        MessageKind::Warning => format!("[!] {text}").bright_yellow().to_string(),
        MessageKind::Error => format!("[x] {text}").bright_red().to_string(),
        MessageKind::Hint => text.dimmed().to_string(),
        MessageKind::Section => format!("=== {} ===", text.trim()).bold().to_string(),
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = apply_style(kind, message);
    match kind {
        MessageKind::Section => println!("\n{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn hint(message: impl fmt::Display) {
    print(MessageKind::Hint, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// Prints rows as left-aligned columns sized to their widest cell.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) {
    for line in table_lines(headers, rows) {
        println!("{}", line);
    }
}

fn table_lines(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            let width = cell.chars().count();
            match widths.get_mut(idx) {
                Some(current) => *current = (*current).max(width),
                None => widths.push(width),
            }
        }
    }

    let format_row = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(idx, cell)| {
                let pad = widths[idx].saturating_sub(cell.chars().count());
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_row(headers.to_vec()));
    lines.push(
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        lines.push(format_row(row.iter().map(String::as_str).collect()));
    }
    lines
}

/// Formats an amount with two decimals, grouping and the currency symbol.
pub fn format_money(amount: Decimal, currency: &str) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    match currency_symbol(currency) {
        Some(symbol) => format!("{sign}{symbol}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}.{fraction} {}", currency.to_uppercase()),
    }
}

pub fn format_percent(value: Decimal) -> String {
    format!("{:.1}%", value.round_dp(1))
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code.to_ascii_uppercase().as_str() {
        "USD" | "CAD" | "AUD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        "INR" => Some("₹"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn money_is_grouped_and_rounded() {
        assert_eq!(format_money(dec!(1234567.005), "USD"), "$1,234,567.01");
        assert_eq!(format_money(dec!(-42.5), "eur"), "-€42.50");
        assert_eq!(format_money(dec!(999), "CHF"), "999.00 CHF");
        assert_eq!(format_money(Decimal::ZERO, "USD"), "$0.00");
    }

    #[test]
    fn percent_has_one_decimal() {
        assert_eq!(format_percent(dec!(33.333)), "33.3%");
    }

    #[test]
    fn table_pads_columns() {
        let lines = table_lines(
            &["#", "Name"],
            &[vec!["1".into(), "Groceries".into()], vec!["10".into(), "Rent".into()]],
        );
        assert_eq!(lines[0], "#   Name");
        assert_eq!(lines[1], "--  ---------");
        assert_eq!(lines[2], "1   Groceries");
        assert_eq!(lines[3], "10  Rent");
    }
}

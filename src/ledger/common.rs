//! Shared traits and enums for ledger records.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exposes a stable identifier for records stored in the snapshot.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Supplies a common contract for retrieving monetary amounts.
pub trait Amounted {
    fn amount(&self) -> Decimal;
}

/// Names each record collection, used when reporting missing identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Transaction,
    Budget,
    Goal,
    Investment,
    Bill,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecordKind::Transaction => "Transaction",
            RecordKind::Budget => "Budget",
            RecordKind::Goal => "Goal",
            RecordKind::Investment => "Investment",
            RecordKind::Bill => "Bill",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
/// Direction of money for a transaction.
pub enum TransactionType {
    Income,
    #[default]
    Expense,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        };
        f.write_str(label)
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(format!("unknown transaction type `{other}`")),
        }
    }
}

/// Removes the record with `id`, returning whether anything was removed.
pub(crate) fn remove_by_id<T: Identifiable>(items: &mut Vec<T>, id: Uuid) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() != before
}

/// Returns `true` when the value is blank after trimming.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

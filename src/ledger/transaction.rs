//! Income and expense records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{Amounted, Identifiable, TransactionType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub recurring: bool,
}

impl Transaction {
    pub fn new(
        amount: Decimal,
        category: impl Into<String>,
        description: impl Into<String>,
        kind: TransactionType,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            category: category.into(),
            description: description.into(),
            date,
            kind,
            merchant: None,
            location: None,
            tags: Vec::new(),
            recurring: false,
        }
    }

    /// Builds a transaction from user input, normalizing optional text fields.
    pub fn from_draft(draft: NewTransaction, date: NaiveDate) -> Self {
        let mut txn = Self::new(
            draft.amount,
            draft.category.trim(),
            draft.description.trim(),
            draft.kind,
            date,
        );
        txn.merchant = normalize_optional(draft.merchant);
        txn.tags = normalize_tags(draft.tags);
        txn
    }

    pub fn with_merchant(mut self, merchant: impl Into<String>) -> Self {
        self.merchant = normalize_optional(Some(merchant.into()));
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = normalize_tags(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Amounted for Transaction {
    fn amount(&self) -> Decimal {
        self.amount
    }
}

/// User-supplied fields for a new transaction. Identifier and date are assigned on insert.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewTransaction {
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub kind: TransactionType,
    pub merchant: Option<String>,
    pub tags: Vec<String>,
}

impl NewTransaction {
    pub fn expense(
        amount: Decimal,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            category: category.into(),
            description: description.into(),
            kind: TransactionType::Expense,
            ..Self::default()
        }
    }

    pub fn income(
        amount: Decimal,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind: TransactionType::Income,
            ..Self::expense(amount, category, description)
        }
    }

    pub fn with_merchant(mut self, merchant: impl Into<String>) -> Self {
        self.merchant = Some(merchant.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Partial update for an existing transaction. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub kind: Option<TransactionType>,
    pub merchant: Option<Option<String>>,
    pub location: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
    pub recurring: Option<bool>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn apply(self, txn: &mut Transaction) {
        if let Some(amount) = self.amount {
            txn.amount = amount;
        }
        if let Some(category) = self.category {
            txn.category = category.trim().to_string();
        }
        if let Some(description) = self.description {
            txn.description = description.trim().to_string();
        }
        if let Some(date) = self.date {
            txn.date = date;
        }
        if let Some(kind) = self.kind {
            txn.kind = kind;
        }
        if let Some(merchant) = self.merchant {
            txn.merchant = normalize_optional(merchant);
        }
        if let Some(location) = self.location {
            txn.location = normalize_optional(location);
        }
        if let Some(tags) = self.tags {
            txn.tags = normalize_tags(tags);
        }
        if let Some(recurring) = self.recurring {
            txn.recurring = recurring;
        }
    }
}

/// Splits a comma separated tag list, dropping blank entries.
pub fn parse_tags(raw: &str) -> Vec<String> {
    normalize_tags(raw.split(',').map(str::to_string).collect())
}

fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

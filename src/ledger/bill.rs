//! Bills and their payment status.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{Amounted, Identifiable};

/// `Overdue` is a stored label only; nothing derives it from the due date.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    #[default]
    Pending,
    Paid,
    Overdue,
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BillStatus::Pending => "pending",
            BillStatus::Paid => "paid",
            BillStatus::Overdue => "overdue",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: Uuid,
    pub name: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub category: String,
    #[serde(default)]
    pub status: BillStatus,
    #[serde(default)]
    pub recurring: bool,
}

impl Bill {
    pub fn new(
        name: impl Into<String>,
        amount: Decimal,
        due_date: NaiveDate,
        category: impl Into<String>,
        recurring: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into().trim().to_string(),
            amount,
            due_date,
            category: category.into().trim().to_string(),
            status: BillStatus::Pending,
            recurring,
        }
    }

    pub fn is_paid(&self) -> bool {
        self.status == BillStatus::Paid
    }
}

impl Identifiable for Bill {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Amounted for Bill {
    fn amount(&self) -> Decimal {
        self.amount
    }
}

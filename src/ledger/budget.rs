//! Category spending limits.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::Identifiable;

pub const DEFAULT_COLOR: &str = "#facc15";

/// An allocation for one category. `spent` is derived from expense transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: Uuid,
    pub category: String,
    pub allocated: Decimal,
    #[serde(default)]
    pub spent: Decimal,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub trend: Decimal,
    #[serde(default)]
    pub last_month: Decimal,
}

impl Budget {
    pub fn new(category: impl Into<String>, allocated: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            category: category.into().trim().to_string(),
            allocated,
            spent: Decimal::ZERO,
            color: default_color(),
            trend: Decimal::ZERO,
            last_month: Decimal::ZERO,
        }
    }

    pub fn remaining(&self) -> Decimal {
        self.allocated.saturating_sub(self.spent)
    }
}

impl Identifiable for Budget {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Caller-editable budget fields. `spent` is intentionally absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetPatch {
    pub category: Option<String>,
    pub allocated: Option<Decimal>,
}

impl BudgetPatch {
    pub fn apply(self, budget: &mut Budget) {
        if let Some(category) = self.category {
            budget.category = category.trim().to_string();
        }
        if let Some(allocated) = self.allocated {
            budget.allocated = allocated;
        }
    }
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

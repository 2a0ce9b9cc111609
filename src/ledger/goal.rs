//! Savings goals and their contribution rule.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{budget::DEFAULT_COLOR, common::Identifiable};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GoalPriority {
    High,
    #[default]
    Medium,
    Low,
}

impl fmt::Display for GoalPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GoalPriority::High => "high",
            GoalPriority::Medium => "medium",
            GoalPriority::Low => "low",
        };
        f.write_str(label)
    }
}

impl std::str::FromStr for GoalPriority {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(GoalPriority::High),
            "medium" => Ok(GoalPriority::Medium),
            "low" => Ok(GoalPriority::Low),
            other => Err(format!("unknown priority `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: Uuid,
    pub name: String,
    pub target: Decimal,
    #[serde(default)]
    pub current: Decimal,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub priority: GoalPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_color")]
    pub color: String,
}

impl Goal {
    pub fn new(
        name: impl Into<String>,
        target: Decimal,
        deadline: NaiveDate,
        category: impl Into<String>,
        priority: GoalPriority,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into().trim().to_string(),
            target,
            current: Decimal::ZERO,
            deadline,
            category: category.into().trim().to_string(),
            priority,
            description: None,
            color: default_color(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let text = description.into().trim().to_string();
        self.description = (!text.is_empty()).then_some(text);
        self
    }

    /// Credits `amount`, never exceeding the target.
    pub fn credit(&mut self, amount: Decimal) {
        self.current = self.current.saturating_add(amount).min(self.target);
    }

    pub fn is_funded(&self) -> bool {
        self.current >= self.target
    }
}

impl Identifiable for Goal {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// User-supplied fields for a new goal.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGoal {
    pub name: String,
    pub target: Decimal,
    pub deadline: NaiveDate,
    pub category: String,
    pub priority: GoalPriority,
    pub description: Option<String>,
}

impl NewGoal {
    pub fn new(name: impl Into<String>, target: Decimal, deadline: NaiveDate) -> Self {
        Self {
            name: name.into(),
            target,
            deadline,
            category: String::new(),
            priority: GoalPriority::default(),
            description: None,
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn priority(mut self, priority: GoalPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl From<NewGoal> for Goal {
    fn from(draft: NewGoal) -> Self {
        let goal = Goal::new(
            draft.name,
            draft.target,
            draft.deadline,
            draft.category,
            draft.priority,
        );
        match draft.description {
            Some(description) => goal.with_description(description),
            None => goal,
        }
    }
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn goal(target: Decimal) -> Goal {
        Goal::new(
            "Trip",
            target,
            NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            "Travel",
            GoalPriority::Low,
        )
    }

    #[test]
    fn credit_clamps_to_target() {
        let mut goal = goal(dec!(1000));
        goal.credit(dec!(1200));
        assert_eq!(goal.current, dec!(1000));
        assert!(goal.is_funded());
    }

    #[test]
    fn credit_near_the_decimal_limit_clamps() {
        let mut goal = goal(Decimal::MAX);
        goal.credit(Decimal::MAX);
        goal.credit(Decimal::MAX);
        assert_eq!(goal.current, Decimal::MAX);
        assert!(goal.is_funded());
    }

    #[test]
    fn credit_accumulates_below_target() {
        let mut goal = goal(dec!(1000));
        goal.credit(dec!(250));
        goal.credit(dec!(250.50));
        assert_eq!(goal.current, dec!(500.50));
        assert!(!goal.is_funded());
    }

    #[test]
    fn blank_description_is_dropped() {
        let goal = goal(dec!(10)).with_description("  ");
        assert!(goal.description.is_none());
    }
}

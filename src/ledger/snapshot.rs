//! The persisted unit: every record collection plus settings.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    aggregates,
    bill::Bill,
    budget::Budget,
    common::{remove_by_id, TransactionType},
    goal::{Goal, GoalPriority},
    investment::Investment,
    settings::Settings,
    transaction::Transaction,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub investments: Vec<Investment>,
    #[serde(default)]
    pub bills: Vec<Bill>,
    #[serde(default)]
    pub settings: Settings,
}

impl Snapshot {
    /// Seed data used on first start or when stored data cannot be read.
    pub fn with_defaults(today: NaiveDate) -> Self {
        let salary = Transaction::new(
            Decimal::from(3500),
            "Salary",
            "Monthly Salary",
            TransactionType::Income,
            today,
        )
        .with_merchant("TechCorp Inc.")
        .with_tags(["work", "salary"]);
        let salary = Transaction {
            location: Some("Direct Deposit".into()),
            recurring: true,
            ..salary
        };

        let emergency_fund = Goal::new(
            "Emergency Fund",
            Decimal::from(15000),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or(today),
            "Savings",
            GoalPriority::High,
        )
        .with_description("6 months of expenses for financial security");

        let mut snapshot = Self {
            transactions: vec![salary],
            budgets: vec![
                Budget::new("Housing", Decimal::from(1500)),
                Budget::new("Food", Decimal::from(600)),
            ],
            goals: vec![emergency_fund],
            investments: Vec::new(),
            bills: Vec::new(),
            settings: Settings::default(),
        };
        snapshot.recompute_budget_spent();
        snapshot
    }

    /// Inserts at the front so the list stays most-recent-first.
    pub fn prepend_transaction(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        self.transactions.insert(0, transaction);
        id
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn transaction_mut(&mut self, id: Uuid) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|txn| txn.id == id)
    }

    pub fn remove_transaction(&mut self, id: Uuid) -> bool {
        remove_by_id(&mut self.transactions, id)
    }

    pub fn budget(&self, id: Uuid) -> Option<&Budget> {
        self.budgets.iter().find(|budget| budget.id == id)
    }

    pub fn budget_mut(&mut self, id: Uuid) -> Option<&mut Budget> {
        self.budgets.iter_mut().find(|budget| budget.id == id)
    }

    pub fn remove_budget(&mut self, id: Uuid) -> bool {
        remove_by_id(&mut self.budgets, id)
    }

    pub fn goal(&self, id: Uuid) -> Option<&Goal> {
        self.goals.iter().find(|goal| goal.id == id)
    }

    pub fn goal_mut(&mut self, id: Uuid) -> Option<&mut Goal> {
        self.goals.iter_mut().find(|goal| goal.id == id)
    }

    pub fn remove_goal(&mut self, id: Uuid) -> bool {
        remove_by_id(&mut self.goals, id)
    }

    pub fn investment(&self, id: Uuid) -> Option<&Investment> {
        self.investments.iter().find(|inv| inv.id == id)
    }

    pub fn remove_investment(&mut self, id: Uuid) -> bool {
        remove_by_id(&mut self.investments, id)
    }

    pub fn bill(&self, id: Uuid) -> Option<&Bill> {
        self.bills.iter().find(|bill| bill.id == id)
    }

    pub fn bill_mut(&mut self, id: Uuid) -> Option<&mut Bill> {
        self.bills.iter_mut().find(|bill| bill.id == id)
    }

    pub fn remove_bill(&mut self, id: Uuid) -> bool {
        remove_by_id(&mut self.bills, id)
    }

    /// Rewrites every budget's `spent` from the current transactions.
    pub fn recompute_budget_spent(&mut self) {
        self.budgets = aggregates::recompute_budget_spent(&self.transactions, &self.budgets);
    }
}

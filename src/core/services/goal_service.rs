//! Savings goals and contributions.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::errors::LedgerError;
use crate::ledger::{Goal, GoalProgress, NewGoal, NewTransaction, RecordKind, Snapshot, Transaction};

use super::{require_positive, require_text, require_transaction_totals, ServiceResult};

pub const CONTRIBUTION_CATEGORY: &str = "Savings";

pub struct GoalService;

impl GoalService {
    pub fn add(snapshot: &mut Snapshot, draft: NewGoal) -> ServiceResult<Uuid> {
        require_text("name", &draft.name)?;
        require_positive("target", draft.target)?;
        let goal = Goal::from(draft);
        let id = goal.id;
        snapshot.goals.push(goal);
        Ok(id)
    }

    /// Credits `amount` to the goal and records the matching savings expense.
    ///
    /// The goal's balance is clamped to its target while the companion
    /// transaction carries the full amount. Returns the companion's id.
    pub fn contribute(
        snapshot: &mut Snapshot,
        goal_id: Uuid,
        amount: Decimal,
        today: NaiveDate,
    ) -> ServiceResult<Uuid> {
        let goal = snapshot
            .goal(goal_id)
            .ok_or_else(|| LedgerError::not_found(RecordKind::Goal, goal_id))?;
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(amount));
        }
        let draft = NewTransaction::expense(
            amount,
            CONTRIBUTION_CATEGORY,
            format!("Contribution to {}", goal.name),
        )
        .with_tags(["goal", "savings"]);
        let txn = Transaction::from_draft(draft, today);
        require_transaction_totals(snapshot.transactions.iter().chain([&txn]))?;

        if let Some(goal) = snapshot.goal_mut(goal_id) {
            goal.credit(amount);
        }
        let id = snapshot.prepend_transaction(txn);
        snapshot.recompute_budget_spent();
        Ok(id)
    }

    pub fn remove(snapshot: &mut Snapshot, id: Uuid) -> bool {
        snapshot.remove_goal(id)
    }

    pub fn progress(snapshot: &Snapshot, today: NaiveDate) -> Vec<GoalProgress> {
        snapshot
            .goals
            .iter()
            .map(|goal| GoalProgress::from_goal(goal, today))
            .collect()
    }
}

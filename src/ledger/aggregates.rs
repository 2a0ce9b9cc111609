//! Derived values computed from the stored records.

use std::{cmp::Ordering, fmt};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    bill::{Bill, BillStatus},
    budget::Budget,
    common::Amounted,
    goal::Goal,
    transaction::Transaction,
};

/// Full recompute of every budget's `spent`. Budget order is preserved and
/// budgets sharing a category each receive the whole category total.
pub fn recompute_budget_spent(transactions: &[Transaction], budgets: &[Budget]) -> Vec<Budget> {
    budgets
        .iter()
        .map(|budget| Budget {
            spent: expense_total_for_category(transactions, &budget.category),
            ..budget.clone()
        })
        .collect()
}

pub fn expense_total_for_category(transactions: &[Transaction], category: &str) -> Decimal {
    saturating_total(
        transactions
            .iter()
            .filter(|txn| txn.is_expense() && txn.category == category)
            .map(Amounted::amount),
    )
}

pub fn total_income(transactions: &[Transaction]) -> Decimal {
    saturating_total(income_amounts(transactions))
}

pub fn total_expenses(transactions: &[Transaction]) -> Decimal {
    saturating_total(expense_amounts(transactions))
}

pub fn income_amounts(transactions: &[Transaction]) -> impl Iterator<Item = Decimal> + '_ {
    transactions
        .iter()
        .filter(|txn| txn.is_income())
        .map(Amounted::amount)
}

pub fn expense_amounts(transactions: &[Transaction]) -> impl Iterator<Item = Decimal> + '_ {
    transactions
        .iter()
        .filter(|txn| txn.is_expense())
        .map(Amounted::amount)
}

/// Sum of `amounts`, or `None` once it leaves the range `Decimal` can hold.
pub fn checked_total<I>(amounts: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, Decimal::checked_add)
}

/// Sum of `amounts`, pinned at `Decimal::MAX` / `Decimal::MIN`.
pub fn saturating_total<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// `part / whole * 100`, or zero when `whole` is zero. Ratios too large to
/// represent saturate towards the sign of the result.
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or_else(|| {
            if part.is_sign_negative() != whole.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            }
        })
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Describes how spending compares with the allocation.
pub enum BudgetStatus {
    OnTrack,
    OverBudget,
    UnderBudget,
    Empty,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetStatus::OnTrack => "On Track",
            BudgetStatus::OverBudget => "Over Budget",
            BudgetStatus::UnderBudget => "Under Budget",
            BudgetStatus::Empty => "Empty",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetUsage {
    pub budget_id: Uuid,
    pub category: String,
    pub allocated: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percent_used: Decimal,
    pub status: BudgetStatus,
}

impl BudgetUsage {
    pub fn from_budget(budget: &Budget) -> Self {
        let status = if budget.allocated.is_zero() && budget.spent.is_zero() {
            BudgetStatus::Empty
        } else {
            match budget.spent.cmp(&budget.allocated) {
                Ordering::Greater => BudgetStatus::OverBudget,
                Ordering::Less => BudgetStatus::UnderBudget,
                Ordering::Equal => BudgetStatus::OnTrack,
            }
        };
        Self {
            budget_id: budget.id,
            category: budget.category.clone(),
            allocated: budget.allocated,
            spent: budget.spent,
            remaining: budget.remaining(),
            percent_used: percent_of(budget.spent, budget.allocated),
            status,
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.status == BudgetStatus::OverBudget
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalProgress {
    pub goal_id: Uuid,
    pub name: String,
    pub current: Decimal,
    pub target: Decimal,
    pub remaining: Decimal,
    pub percent: Decimal,
    /// Days until the deadline; negative once it has passed.
    pub days_left: i64,
}

impl GoalProgress {
    pub fn from_goal(goal: &Goal, today: NaiveDate) -> Self {
        Self {
            goal_id: goal.id,
            name: goal.name.clone(),
            current: goal.current,
            target: goal.target,
            remaining: goal.target.saturating_sub(goal.current).max(Decimal::ZERO),
            percent: percent_of(goal.current, goal.target),
            days_left: (goal.deadline - today).num_days(),
        }
    }

    pub fn is_overdue(&self) -> bool {
        self.days_left <= 0 && self.remaining > Decimal::ZERO
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BillTotals {
    pub total: Decimal,
    pub paid: Decimal,
    pub pending: Decimal,
    pub overdue: Decimal,
}

impl BillTotals {
    pub fn from_bills(bills: &[Bill]) -> Self {
        bills.iter().fold(Self::default(), |mut totals, bill| {
            totals.total = totals.total.saturating_add(bill.amount);
            let bucket = match bill.status {
                BillStatus::Paid => &mut totals.paid,
                BillStatus::Pending => &mut totals.pending,
                BillStatus::Overdue => &mut totals.overdue,
            };
            *bucket = bucket.saturating_add(bill.amount);
            totals
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::common::TransactionType;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
    }

    fn txn(amount: Decimal, category: &str, kind: TransactionType) -> Transaction {
        Transaction::new(amount, category, "entry", kind, date())
    }

    #[test]
    fn recompute_only_counts_matching_expenses() {
        let transactions = vec![
            txn(dec!(40), "Food", TransactionType::Expense),
            txn(dec!(60), "Food", TransactionType::Expense),
            txn(dec!(500), "Food", TransactionType::Income),
            txn(dec!(900), "Housing", TransactionType::Expense),
            txn(dec!(5), "food", TransactionType::Expense),
        ];
        let budgets = vec![Budget::new("Food", dec!(600)), Budget::new("Travel", dec!(100))];
        let updated = recompute_budget_spent(&transactions, &budgets);
        assert_eq!(updated[0].spent, dec!(100));
        assert_eq!(updated[1].spent, Decimal::ZERO);
        assert_eq!(updated[0].id, budgets[0].id);
    }

    #[test]
    fn budgets_sharing_a_category_each_get_full_total() {
        let transactions = vec![txn(dec!(75), "Fun", TransactionType::Expense)];
        let budgets = vec![Budget::new("Fun", dec!(50)), Budget::new("Fun", dec!(200))];
        let updated = recompute_budget_spent(&transactions, &budgets);
        assert!(updated.iter().all(|b| b.spent == dec!(75)));
    }

    #[test]
    fn recompute_is_idempotent() {
        let transactions = vec![txn(dec!(12.34), "Food", TransactionType::Expense)];
        let budgets = vec![Budget::new("Food", dec!(50))];
        let once = recompute_budget_spent(&transactions, &budgets);
        let twice = recompute_budget_spent(&transactions, &once);
        assert_eq!(once, twice);
    }

    #[test]
    fn usage_flags_overspending() {
        let mut budget = Budget::new("Food", dec!(100));
        budget.spent = dec!(150);
        let usage = BudgetUsage::from_budget(&budget);
        assert!(usage.is_over_budget());
        assert_eq!(usage.percent_used, dec!(150));
        assert_eq!(usage.remaining, dec!(-50));
    }

    #[test]
    fn percent_of_zero_whole_is_zero() {
        assert_eq!(percent_of(dec!(10), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn percent_of_tiny_whole_saturates() {
        let tiny = Decimal::new(1, 28);
        assert_eq!(percent_of(dec!(10000), tiny), Decimal::MAX);
        assert_eq!(percent_of(dec!(-10000), tiny), Decimal::MIN);
        assert_eq!(percent_of(dec!(25), dec!(200)), dec!(12.5));
    }

    #[test]
    fn totals_report_overflow_instead_of_panicking() {
        assert_eq!(checked_total([Decimal::MAX, dec!(1)]), None);
        assert_eq!(checked_total([dec!(1.5), dec!(2)]), Some(dec!(3.5)));

        let transactions = vec![
            txn(Decimal::MAX, "Food", TransactionType::Expense),
            txn(Decimal::MAX, "Food", TransactionType::Expense),
        ];
        assert_eq!(total_expenses(&transactions), Decimal::MAX);
        assert_eq!(expense_total_for_category(&transactions, "Food"), Decimal::MAX);
    }

    #[test]
    fn bill_totals_split_by_status() {
        let due = date();
        let mut paid = Bill::new("Rent", dec!(1000), due, "Housing", true);
        paid.status = BillStatus::Paid;
        let pending = Bill::new("Power", dec!(80), due, "Utilities", true);
        let mut late = Bill::new("Phone", dec!(45), due, "Utilities", false);
        late.status = BillStatus::Overdue;
        let totals = BillTotals::from_bills(&[paid, pending, late]);
        assert_eq!(totals.total, dec!(1125));
        assert_eq!(totals.paid, dec!(1000));
        assert_eq!(totals.pending, dec!(80));
        assert_eq!(totals.overdue, dec!(45));
    }

    #[test]
    fn goal_progress_counts_days_left() {
        let goal = Goal::new(
            "Laptop",
            dec!(2000),
            NaiveDate::from_ymd_opt(2025, 1, 20).unwrap(),
            "Technology",
            Default::default(),
        );
        let progress = GoalProgress::from_goal(&goal, date());
        assert_eq!(progress.days_left, 10);
        assert_eq!(progress.remaining, dec!(2000));
        assert!(!progress.is_overdue());
    }
}

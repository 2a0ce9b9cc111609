//! Dashboard figures derived from the snapshot.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::ledger::{
    aggregates::{percent_of, saturating_total, total_expenses, total_income},
    BillTotals, BudgetUsage, GoalProgress, Investment, Snapshot,
};

use super::{BillService, BudgetService, GoalService};

/// Headline totals shown on the overview screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerTotals {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_worth: Decimal,
    pub total_budget: Decimal,
    pub total_spent: Decimal,
    pub budget_used_percent: Decimal,
    pub portfolio: PortfolioSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub value: Decimal,
    pub cost_basis: Decimal,
    pub gain_loss: Decimal,
    pub gain_loss_percent: Decimal,
}

impl PortfolioSummary {
    pub fn from_investments(investments: &[Investment]) -> Self {
        let value = saturating_total(investments.iter().map(Investment::total_value));
        let cost_basis = saturating_total(investments.iter().map(Investment::cost_basis));
        let gain_loss = saturating_total(investments.iter().map(Investment::gain_loss));
        Self {
            value,
            cost_basis,
            gain_loss,
            gain_loss_percent: percent_of(gain_loss, cost_basis),
        }
    }
}

pub struct SummaryService;

impl SummaryService {
    pub fn totals(snapshot: &Snapshot) -> LedgerTotals {
        let income = total_income(&snapshot.transactions);
        let expenses = total_expenses(&snapshot.transactions);
        // Budgets sharing a category each carry the full category total.
        let total_budget = saturating_total(snapshot.budgets.iter().map(|b| b.allocated));
        let total_spent = saturating_total(snapshot.budgets.iter().map(|b| b.spent));
        LedgerTotals {
            total_income: income,
            total_expenses: expenses,
            net_worth: income.saturating_sub(expenses),
            total_budget,
            total_spent,
            budget_used_percent: percent_of(total_spent, total_budget),
            portfolio: PortfolioSummary::from_investments(&snapshot.investments),
        }
    }

    pub fn budget_usage(snapshot: &Snapshot) -> Vec<BudgetUsage> {
        BudgetService::usage(snapshot)
    }

    pub fn goal_progress(snapshot: &Snapshot, today: NaiveDate) -> Vec<GoalProgress> {
        GoalService::progress(snapshot, today)
    }

    pub fn bill_totals(snapshot: &Snapshot) -> BillTotals {
        BillService::totals(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::{InvestmentService, NewInvestment, TransactionService};
    use crate::ledger::NewTransaction;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 20).unwrap()
    }

    #[test]
    fn totals_for_seed_data() {
        let mut snapshot = Snapshot::with_defaults(today());
        TransactionService::add(
            &mut snapshot,
            NewTransaction::expense(dec!(1050), "Housing", "Rent"),
            today(),
        )
        .unwrap();
        let totals = SummaryService::totals(&snapshot);
        assert_eq!(totals.total_income, dec!(3500));
        assert_eq!(totals.total_expenses, dec!(1050));
        assert_eq!(totals.net_worth, dec!(2450));
        assert_eq!(totals.total_budget, dec!(2100));
        assert_eq!(totals.total_spent, dec!(1050));
        assert_eq!(totals.budget_used_percent, dec!(50));
    }

    #[test]
    fn empty_snapshot_has_zero_percentages() {
        let totals = SummaryService::totals(&Snapshot::default());
        assert_eq!(totals.budget_used_percent, Decimal::ZERO);
        assert_eq!(totals.portfolio, PortfolioSummary::default());
    }

    #[test]
    fn portfolio_tracks_price_changes() {
        let mut snapshot = Snapshot::default();
        let id = InvestmentService::add(
            &mut snapshot,
            NewInvestment::new("msft", "Microsoft", dec!(4), dec!(100)),
        )
        .unwrap();
        snapshot.investments.iter_mut().find(|i| i.id == id).unwrap().current_price = dec!(125);
        let portfolio = SummaryService::totals(&snapshot).portfolio;
        assert_eq!(portfolio.value, dec!(500));
        assert_eq!(portfolio.cost_basis, dec!(400));
        assert_eq!(portfolio.gain_loss, dec!(100));
        assert_eq!(portfolio.gain_loss_percent, dec!(25));
    }

    #[test]
    fn totals_with_tiny_allocation_do_not_overflow() {
        let mut snapshot = Snapshot::default();
        BudgetService::add(&mut snapshot, "Tiny", Decimal::new(1, 28)).unwrap();
        TransactionService::add(
            &mut snapshot,
            NewTransaction::expense(dec!(10000), "Tiny", "Big spend"),
            today(),
        )
        .unwrap();

        let totals = SummaryService::totals(&snapshot);
        assert_eq!(totals.total_spent, dec!(10000));
        assert_eq!(totals.budget_used_percent, Decimal::MAX);
        assert_eq!(SummaryService::budget_usage(&snapshot)[0].percent_used, Decimal::MAX);
    }

    #[test]
    fn shared_category_spend_saturates_in_totals() {
        let mut snapshot = Snapshot::default();
        BudgetService::add(&mut snapshot, "Food", dec!(1)).unwrap();
        BudgetService::add(&mut snapshot, "Food", dec!(1)).unwrap();
        TransactionService::add(
            &mut snapshot,
            NewTransaction::expense(Decimal::MAX, "Food", "Feast"),
            today(),
        )
        .unwrap();
        let totals = SummaryService::totals(&snapshot);
        assert_eq!(totals.total_spent, Decimal::MAX);
        assert_eq!(totals.net_worth, Decimal::MIN);
    }
}

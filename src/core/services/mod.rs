pub mod bill_service;
pub mod budget_service;
pub mod goal_service;
pub mod investment_service;
pub mod settings_service;
pub mod summary_service;
pub mod transaction_service;

pub use bill_service::{BillService, NewBill};
pub use budget_service::BudgetService;
pub use goal_service::GoalService;
pub use investment_service::{InvestmentService, NewInvestment};
pub use settings_service::SettingsService;
pub use summary_service::{LedgerTotals, PortfolioSummary, SummaryService};
pub use transaction_service::TransactionService;

use rust_decimal::Decimal;

use crate::errors::LedgerError;
use crate::ledger::aggregates::checked_total;
use crate::ledger::common::is_blank;
use crate::ledger::Transaction;

pub type ServiceResult<T> = Result<T, LedgerError>;

pub(crate) fn require_text(field: &str, value: &str) -> ServiceResult<()> {
    if is_blank(value) {
        return Err(LedgerError::validation(format!("{field} is required")));
    }
    Ok(())
}

pub(crate) fn require_positive(field: &str, value: Decimal) -> ServiceResult<()> {
    if value <= Decimal::ZERO {
        return Err(LedgerError::validation(format!(
            "{field} must be greater than zero"
        )));
    }
    Ok(())
}

pub(crate) fn require_total<I>(what: &str, amounts: I) -> ServiceResult<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    checked_total(amounts)
        .ok_or_else(|| LedgerError::validation(format!("{what} exceeds the supported range")))
}

/// Income and expense totals over `transactions` must stay representable.
/// Category totals are bounded by the expense total, so budget `spent` stays
/// exact as well.
pub(crate) fn require_transaction_totals<'a, I>(transactions: I) -> ServiceResult<()>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let (income, expenses): (Vec<&Transaction>, Vec<&Transaction>) =
        transactions.into_iter().partition(|txn| txn.is_income());
    require_total("total income", income.iter().map(|txn| txn.amount))?;
    require_total("total expenses", expenses.iter().map(|txn| txn.amount))?;
    Ok(())
}
